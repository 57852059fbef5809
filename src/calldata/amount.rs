//! Decimal amount handling for approve calldata.
//!
//! Token amounts arrive as whatever the caller had in hand: an integer, a
//! string (sometimes prefixed with `#` markers from the amount input
//! field), or an arbitrary-precision decimal. Conversion to base units is
//! exact integer arithmetic throughout; floating point never touches an
//! amount.

use num_bigint::BigUint;
use num_traits::Zero;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure converting a human decimal amount into base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The string form did not parse as a decimal numeral.
    #[error("Invalid amount value: {0}")]
    Invalid(String),
    /// The amount was negative.
    #[error("Amount cannot be negative")]
    Negative,
    /// The amount has more fractional digits than the token's decimals can
    /// absorb.
    #[error("Amount results in non-integer value after applying {decimals} decimals")]
    NonIntegerUnits { decimals: u8 },
}

/// An approval amount as supplied by the caller.
///
/// Integers and [`Decimal`] values convert losslessly; the text form is
/// parsed by [`AmountInput::to_base_units`] and may carry leading `#`
/// markers, which are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    /// An arbitrary-precision decimal value.
    Decimal(Decimal),
    /// A decimal numeral as text.
    Text(String),
}

impl AmountInput {
    /// Convert to base units by scaling with `10^decimals`.
    ///
    /// The scaled result must be an exact integer; an amount with more
    /// fractional digits than `decimals` fails rather than rounding.
    pub fn to_base_units(&self, decimals: u8) -> Result<BigUint, AmountError> {
        match self {
            AmountInput::Decimal(value) => decimal_to_base_units(value, decimals),
            AmountInput::Text(text) => text_to_base_units(text, decimals),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Decimal(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_owned())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        AmountInput::Decimal(Decimal::from(value))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Decimal(Decimal::from(value))
    }
}

impl From<u32> for AmountInput {
    fn from(value: u32) -> Self {
        AmountInput::Decimal(Decimal::from(value))
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Decimal(Decimal::from(value))
    }
}

/// Convert a caller-supplied amount into base units.
pub fn to_base_units(
    amount: impl Into<AmountInput>,
    decimals: u8,
) -> Result<BigUint, AmountError> {
    amount.into().to_base_units(decimals)
}

/// Render a base-unit amount as a human decimal string, the inverse of
/// [`to_base_units`]. Trailing fractional zeros are trimmed.
pub fn format_base_units(raw: &BigUint, decimals: u8) -> String {
    let text = raw.to_string();
    if decimals == 0 {
        return text;
    }
    let decimals = usize::from(decimals);
    let (whole, frac) = if text.len() > decimals {
        let split = text.len() - decimals;
        (text[..split].to_owned(), text[split..].to_owned())
    } else {
        ("0".to_owned(), format!("{text:0>decimals$}"))
    };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole
    } else {
        format!("{whole}.{frac}")
    }
}

fn decimal_to_base_units(value: &Decimal, decimals: u8) -> Result<BigUint, AmountError> {
    if value.is_sign_negative() {
        return Err(AmountError::Negative);
    }
    let digits = BigUint::from(value.mantissa().unsigned_abs());
    scale_digits(digits, value.scale(), decimals)
}

fn text_to_base_units(text: &str, decimals: u8) -> Result<BigUint, AmountError> {
    let cleaned = text.trim_start_matches('#');
    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned),
    };

    let (whole, frac) = match body.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (body, ""),
    };
    let valid = (!whole.is_empty() || !frac.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(AmountError::Invalid(text.to_owned()));
    }
    if negative {
        return Err(AmountError::Negative);
    }

    let digits: BigUint = format!("{whole}{frac}")
        .parse()
        .map_err(|_| AmountError::Invalid(text.to_owned()))?;
    scale_digits(digits, frac.len() as u32, decimals)
}

/// Rescale an integer carrying `scale` fractional digits so it carries
/// exactly `decimals` fractional digits.
fn scale_digits(digits: BigUint, scale: u32, decimals: u8) -> Result<BigUint, AmountError> {
    let decimals_u32 = u32::from(decimals);
    if decimals_u32 >= scale {
        Ok(digits * BigUint::from(10u8).pow(decimals_u32 - scale))
    } else {
        let divisor = BigUint::from(10u8).pow(scale - decimals_u32);
        if (&digits % &divisor).is_zero() {
            Ok(digits / divisor)
        } else {
            Err(AmountError::NonIntegerUnits { decimals })
        }
    }
}
