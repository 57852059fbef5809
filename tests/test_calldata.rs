//! Integration tests for approve-calldata rewriting.
//! Tests the full flow: encode an approve call → rewrite the amount →
//! decode and compare every field.

use alloy::primitives::aliases::{U160, U48};
use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::SolCall;
use rust_decimal_macros::dec;
use wallet_approvals::calldata::{IERC20, IPermit2};
use wallet_approvals::{parse_approve_calldata, update_approval_amount, ApproveCall};

const SPENDER: Address = address!("0c54FcCd2e384b4BB6f2E405Bf5Cbc15a017AaFb");
const TOKEN: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
const EXPIRATION: u64 = 1_700_000_000;

const MAX_UINT160: &str = "1461501637330902918203684832716283019655932542975";
const MAX_UINT160_PLUS_ONE: &str = "1461501637330902918203684832716283019655932542976";
const MAX_UINT256_PLUS_ONE: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639936";

fn legacy_calldata(amount: u64) -> Bytes {
    Bytes::from(
        IERC20::approveCall {
            spender: SPENDER,
            amount: U256::from(amount),
        }
        .abi_encode(),
    )
}

fn permit2_calldata(amount: u64) -> Bytes {
    Bytes::from(
        IPermit2::approveCall {
            token: TOKEN,
            spender: SPENDER,
            amount: U160::from(amount),
            expiration: U48::from(EXPIRATION),
        }
        .abi_encode(),
    )
}

#[test]
fn test_legacy_amount_rewritten() {
    // 1.23 tokens at 5 decimals becomes 123000 base units.
    let updated = update_approval_amount(&legacy_calldata(123), dec!(1.23), 5).unwrap();

    assert_eq!(
        parse_approve_calldata(&updated).unwrap(),
        ApproveCall::Legacy {
            spender: SPENDER,
            amount: U256::from(123_000u64),
        }
    );
}

#[test]
fn test_permit2_amount_rewritten_from_marker_string() {
    // Amount strings can arrive with leading # markers from the UI field.
    let updated = update_approval_amount(&permit2_calldata(999), "#1.5", 2).unwrap();

    assert_eq!(
        parse_approve_calldata(&updated).unwrap(),
        ApproveCall::Permit2 {
            token: TOKEN,
            spender: SPENDER,
            amount: U160::from(150u64),
            expiration: U48::from(EXPIRATION),
        },
        "every field except the amount must be carried through"
    );
}

#[test]
fn test_identity_amount_round_trips() {
    // Re-supplying the decimal equivalent of the original amount must
    // reproduce the original payload byte for byte.
    let original = legacy_calldata(123_000);
    let updated = update_approval_amount(&original, "1.23", 5).unwrap();
    assert_eq!(updated, original);

    let permit2 = permit2_calldata(150);
    let updated = update_approval_amount(&permit2, dec!(1.50), 2).unwrap();
    assert_eq!(updated, permit2);
}

#[test]
fn test_negative_amount_rejected() {
    let err = update_approval_amount(&legacy_calldata(1), -5, 2).unwrap_err();
    assert_eq!(err.to_string(), "Amount cannot be negative");

    let err = update_approval_amount(&permit2_calldata(1), dec!(-0.5), 2).unwrap_err();
    assert_eq!(err.to_string(), "Amount cannot be negative");
}

#[test]
fn test_fractional_remainder_rejected() {
    let err = update_approval_amount(&legacy_calldata(1), dec!(1.234), 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Amount results in non-integer value after applying 2 decimals"
    );
}

#[test]
fn test_invalid_amount_strings_rejected() {
    for bad in ["", "abc", "1.2.3", "1,5"] {
        let err = update_approval_amount(&legacy_calldata(1), bad, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid amount value: {bad}"),
            "{bad:?} should surface the invalid-value message"
        );
    }
}

#[test]
fn test_uint160_boundary() {
    // The exact maximum fits.
    let updated = update_approval_amount(&permit2_calldata(1), MAX_UINT160, 0).unwrap();
    match parse_approve_calldata(&updated).unwrap() {
        ApproveCall::Permit2 { amount, .. } => assert_eq!(amount, U160::MAX),
        other => panic!("expected a Permit2 call, got {other:?}"),
    }

    // One past the maximum does not.
    let err =
        update_approval_amount(&permit2_calldata(1), MAX_UINT160_PLUS_ONE, 0).unwrap_err();
    assert_eq!(err.to_string(), "Amount exceeds maximum value for uint160");
}

#[test]
fn test_legacy_accepts_amounts_past_uint160() {
    // The legacy convention carries the full uint256 width.
    let updated =
        update_approval_amount(&legacy_calldata(1), MAX_UINT160_PLUS_ONE, 0).unwrap();
    match parse_approve_calldata(&updated).unwrap() {
        ApproveCall::Legacy { amount, .. } => {
            assert_eq!(amount.to_string(), MAX_UINT160_PLUS_ONE);
        }
        other => panic!("expected a legacy call, got {other:?}"),
    }

    let err =
        update_approval_amount(&legacy_calldata(1), MAX_UINT256_PLUS_ONE, 0).unwrap_err();
    assert_eq!(err.to_string(), "Amount exceeds maximum value for uint256");
}

#[test]
fn test_unrecognized_calldata_rejected() {
    let garbage = Bytes::from(vec![0xde, 0xad, 0xbe, 0xef, 0x00]);
    let err = update_approval_amount(&garbage, "1", 0).unwrap_err();
    assert!(
        err.to_string().starts_with("unrecognized approve calldata"),
        "got: {err}"
    );
}

#[test]
fn test_amount_validation_precedes_legacy_decode() {
    // A bad amount surfaces its own error even when the calldata is also
    // unrecognizable.
    let garbage = Bytes::from(vec![0xde, 0xad, 0xbe, 0xef, 0x00]);
    let err = update_approval_amount(&garbage, -5, 0).unwrap_err();
    assert_eq!(err.to_string(), "Amount cannot be negative");
}
