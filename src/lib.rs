//! Wallet approval internals: pending-request triage and approve-calldata
//! rewriting.
//!
//! Two independent components live here:
//! - [`triage`] walks a snapshot of pending approval requests and terminates
//!   every one according to its kind (the bulk "reject all" flows).
//! - [`calldata`] decodes ERC-20 / Permit2 `approve` calldata and re-encodes
//!   it with an edited allowance amount, exact arithmetic throughout.
//!
//! Neither component holds state or performs I/O; both are driven entirely
//! by their callers.

pub mod calldata;
pub mod triage;

pub use calldata::{
    format_base_units, parse_approve_calldata, to_base_units, update_approval_amount,
    AmountError, AmountInput, ApproveCall, CalldataError,
};
pub use triage::{
    ApprovalKind, ApprovalResolver, ApprovalTriage, PendingApproval, ProviderError,
    ResolveError, TriageDecision, TriageOptions,
};
