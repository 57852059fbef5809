//! The two approve calling conventions and calldata surgery over them.
//!
//! Legacy ERC-20 `approve(address,uint256)` and the Permit2 allowance
//! `approve(address,address,uint160,uint48)`. Calldata is classified
//! structurally: a payload that decodes against the Permit2 signature is
//! Permit2, anything else is treated as legacy. No registry of token or
//! router addresses is consulted.

use alloy::primitives::aliases::{U160, U48};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use num_bigint::BigUint;
use thiserror::Error;

use crate::calldata::amount::{AmountError, AmountInput};

sol! {
    // Minimal ERC-20 surface, just the call this module rewrites.
    contract IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    // The Permit2 IAllowanceTransfer approve, per the canonical contract.
    contract IPermit2 {
        function approve(address token, address spender, uint160 amount, uint48 expiration) external;
    }
}

/// Failure decoding or rebuilding approve calldata.
#[derive(Debug, Error)]
pub enum CalldataError {
    /// The amount did not convert to base units.
    #[error(transparent)]
    Amount(#[from] AmountError),
    /// Permit2 amounts are capped at 160 bits.
    #[error("Amount exceeds maximum value for uint160")]
    ExceedsUint160,
    /// Legacy amounts are capped at the uint256 slot.
    #[error("Amount exceeds maximum value for uint256")]
    ExceedsUint256,
    /// The payload matched neither approve signature.
    #[error("unrecognized approve calldata: {0}")]
    Decode(#[from] alloy::sol_types::Error),
}

/// A decoded `approve` invocation, either calling convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproveCall {
    /// ERC-20 `approve(address,uint256)`.
    Legacy {
        /// Account granted the allowance.
        spender: Address,
        /// Allowance in base units.
        amount: U256,
    },
    /// Permit2 `approve(address,address,uint160,uint48)`.
    Permit2 {
        /// Token the allowance applies to.
        token: Address,
        /// Account granted the allowance.
        spender: Address,
        /// Allowance in base units.
        amount: U160,
        /// Unix timestamp after which the allowance lapses.
        expiration: U48,
    },
}

impl ApproveCall {
    /// The account granted the allowance.
    pub fn spender(&self) -> Address {
        match self {
            ApproveCall::Legacy { spender, .. } => *spender,
            ApproveCall::Permit2 { spender, .. } => *spender,
        }
    }

    /// True when the call clears the allowance entirely.
    pub fn is_revoke_all(&self) -> bool {
        match self {
            ApproveCall::Legacy { amount, .. } => amount.is_zero(),
            ApproveCall::Permit2 { amount, .. } => amount.is_zero(),
        }
    }

    /// True when the amount is the encoding's maximum, the conventional
    /// "unlimited" allowance.
    pub fn is_unlimited(&self) -> bool {
        match self {
            ApproveCall::Legacy { amount, .. } => *amount == U256::MAX,
            ApproveCall::Permit2 { amount, .. } => *amount == U160::MAX,
        }
    }

    /// Re-encode with the same calling convention the call was decoded
    /// from, selector included.
    pub fn encode(&self) -> Bytes {
        match self {
            ApproveCall::Legacy { spender, amount } => Bytes::from(
                IERC20::approveCall {
                    spender: *spender,
                    amount: *amount,
                }
                .abi_encode(),
            ),
            ApproveCall::Permit2 {
                token,
                spender,
                amount,
                expiration,
            } => Bytes::from(
                IPermit2::approveCall {
                    token: *token,
                    spender: *spender,
                    amount: *amount,
                    expiration: *expiration,
                }
                .abi_encode(),
            ),
        }
    }
}

/// Decode approve calldata, trying the Permit2 shape first and falling
/// back to legacy ERC-20.
pub fn parse_approve_calldata(data: &Bytes) -> Result<ApproveCall, CalldataError> {
    if let Ok(call) = IPermit2::approveCall::abi_decode(data) {
        return Ok(ApproveCall::Permit2 {
            token: call.token,
            spender: call.spender,
            amount: call.amount,
            expiration: call.expiration,
        });
    }
    let call = IERC20::approveCall::abi_decode(data)?;
    Ok(ApproveCall::Legacy {
        spender: call.spender,
        amount: call.amount,
    })
}

/// Rewrite the amount inside existing approve calldata.
///
/// The payload's calling convention is detected structurally, the new
/// amount is converted to base units with exact arithmetic, range-checked
/// against the convention's amount width, and the call is re-encoded with
/// every other field carried through unchanged.
///
/// Amount validation runs before the fallback legacy decode, so a bad
/// amount surfaces its own error even when the calldata is also bad.
pub fn update_approval_amount(
    original_data: &Bytes,
    new_amount: impl Into<AmountInput>,
    decimals: u8,
) -> Result<Bytes, CalldataError> {
    let permit2 = IPermit2::approveCall::abi_decode(original_data).ok();
    let raw = new_amount.into().to_base_units(decimals)?;

    let updated = match permit2 {
        Some(call) => ApproveCall::Permit2 {
            token: call.token,
            spender: call.spender,
            amount: biguint_to_u160(&raw).ok_or(CalldataError::ExceedsUint160)?,
            expiration: call.expiration,
        },
        None => {
            let call = IERC20::approveCall::abi_decode(original_data)?;
            ApproveCall::Legacy {
                spender: call.spender,
                amount: biguint_to_u256(&raw).ok_or(CalldataError::ExceedsUint256)?,
            }
        }
    };
    Ok(updated.encode())
}

fn biguint_to_u160(value: &BigUint) -> Option<U160> {
    U160::try_from_be_slice(&value.to_bytes_be())
}

fn biguint_to_u256(value: &BigUint) -> Option<U256> {
    U256::try_from_be_slice(&value.to_bytes_be())
}
