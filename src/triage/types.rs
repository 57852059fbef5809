//! Core types for approval-request triage.
//!
//! These mirror the wallet's wire-level approval objects: the kinds of
//! request the approval queue can hold, the pending request itself, and the
//! standardized rejection error a dapp receives when its request is turned
//! down in bulk.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// EIP-1193 provider error code for a user-rejected request.
pub const USER_REJECTED_REQUEST_CODE: i64 = 4001;

/// The structured `cause` recorded when a bulk triage pass rejects a request.
/// Other parts of the wallet pattern-match on this exact string.
pub const REJECT_ALL_CAUSE: &str = "rejectAllApprovals";

/// The `type` tag of a pending approval request.
///
/// The approval queue is polymorphic over this tag. The variants here are
/// the kinds the triage policy distinguishes; every other tag rides in
/// [`ApprovalKind::Other`] and takes the default branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalKind {
    /// A transaction awaiting user confirmation.
    Transaction,
    /// An EIP-712 typed-data signature request.
    EthSignTypedData,
    /// A snap dialog that only displays information.
    SnapDialogAlert,
    /// A snap dialog asking for an ok/cancel decision.
    SnapDialogConfirmation,
    /// A snap dialog asking for free-form input.
    SnapDialogPrompt,
    /// A snap dialog with no declared subtype.
    SnapDialogDefault,
    /// A keyring snap confirming account creation.
    ConfirmAccountCreation,
    /// A keyring snap confirming account removal.
    ConfirmAccountRemoval,
    /// A keyring snap asking to show its account-management redirect.
    ShowSnapAccountRedirect,
    /// Any tag this crate has no special handling for.
    Other(String),
}

impl ApprovalKind {
    /// The exact wire string the approval queue uses for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ApprovalKind::Transaction => "transaction",
            ApprovalKind::EthSignTypedData => "eth_signTypedData",
            ApprovalKind::SnapDialogAlert => "snap_dialog:alert",
            ApprovalKind::SnapDialogConfirmation => "snap_dialog:confirmation",
            ApprovalKind::SnapDialogPrompt => "snap_dialog:prompt",
            ApprovalKind::SnapDialogDefault => "snap_dialog",
            ApprovalKind::ConfirmAccountCreation => "snap_manageAccounts:confirmAccountCreation",
            ApprovalKind::ConfirmAccountRemoval => "snap_manageAccounts:confirmAccountRemoval",
            ApprovalKind::ShowSnapAccountRedirect => "showSnapAccountRedirect",
            ApprovalKind::Other(tag) => tag,
        }
    }

    /// True for the snap dialogs that carry no decision: alert, prompt, or a
    /// dialog with no declared subtype.
    pub fn is_informational_dialog(&self) -> bool {
        matches!(
            self,
            ApprovalKind::SnapDialogAlert
                | ApprovalKind::SnapDialogPrompt
                | ApprovalKind::SnapDialogDefault
        )
    }

    /// True for the snap-account-management confirmation kinds.
    pub fn is_account_management(&self) -> bool {
        matches!(
            self,
            ApprovalKind::ConfirmAccountCreation
                | ApprovalKind::ConfirmAccountRemoval
                | ApprovalKind::ShowSnapAccountRedirect
        )
    }

    /// True for any snap dialog kind, confirmations included.
    pub fn is_snap_dialog(&self) -> bool {
        self.is_informational_dialog() || *self == ApprovalKind::SnapDialogConfirmation
    }
}

impl From<String> for ApprovalKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "transaction" => ApprovalKind::Transaction,
            "eth_signTypedData" => ApprovalKind::EthSignTypedData,
            "snap_dialog:alert" => ApprovalKind::SnapDialogAlert,
            "snap_dialog:confirmation" => ApprovalKind::SnapDialogConfirmation,
            "snap_dialog:prompt" => ApprovalKind::SnapDialogPrompt,
            "snap_dialog" => ApprovalKind::SnapDialogDefault,
            "snap_manageAccounts:confirmAccountCreation" => ApprovalKind::ConfirmAccountCreation,
            "snap_manageAccounts:confirmAccountRemoval" => ApprovalKind::ConfirmAccountRemoval,
            "showSnapAccountRedirect" => ApprovalKind::ShowSnapAccountRedirect,
            _ => ApprovalKind::Other(tag),
        }
    }
}

impl From<&str> for ApprovalKind {
    fn from(tag: &str) -> Self {
        ApprovalKind::from(tag.to_owned())
    }
}

impl From<ApprovalKind> for String {
    fn from(kind: ApprovalKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl fmt::Display for ApprovalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One outstanding request for a user decision.
///
/// Snapshots of these are handed to [`crate::triage::ApprovalTriage`]; a
/// triage pass terminates every request it is given exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Opaque unique identifier assigned by the approval queue.
    pub id: String,
    /// The request kind the classification policy dispatches on.
    #[serde(rename = "type")]
    pub kind: ApprovalKind,
    /// The requesting site or snap origin, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Free-form request payload. Snap dialogs carry the id of their
    /// rendered UI interface in `requestData.id`.
    #[serde(
        default,
        rename = "requestData",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_data: Option<Value>,
    /// Queue insertion time, epoch milliseconds on the wire. Carried for
    /// callers that sort or log; the triage policy never reads it.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<DateTime<Utc>>,
}

impl PendingApproval {
    /// Create a request with just the required fields.
    pub fn new(id: impl Into<String>, kind: ApprovalKind) -> Self {
        Self {
            id: id.into(),
            kind,
            origin: None,
            request_data: None,
            time: None,
        }
    }

    /// Set the requesting origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Attach a request payload.
    pub fn with_request_data(mut self, data: Value) -> Self {
        self.request_data = Some(data);
        self
    }

    /// Set the queue insertion time.
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// The id of the UI interface rendered for this request, when the
    /// payload carries one.
    pub fn interface_id(&self) -> Option<&str> {
        self.request_data.as_ref()?.get("id")?.as_str()
    }
}

/// The standardized JSON-RPC error delivered to a requester when its
/// approval is rejected.
///
/// For bulk triage the `data` field carries
/// `{"cause": "rejectAllApprovals"}`; the serialized shape is a wire-level
/// contract and must not drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderError {
    /// EIP-1193 error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Structured payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderError {
    /// The standard user-rejection error with no extra payload.
    pub fn user_rejected() -> Self {
        Self {
            code: USER_REJECTED_REQUEST_CODE,
            message: "User rejected the request.".to_owned(),
            data: None,
        }
    }

    /// Attach a structured `data` payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The rejection a bulk triage pass delivers, carrying the
    /// standardized cause payload.
    pub fn rejected_in_bulk() -> Self {
        Self::user_rejected().with_data(serde_json::json!({ "cause": REJECT_ALL_CAUSE }))
    }

    /// The `data.cause` string, when one is set.
    pub fn cause(&self) -> Option<&str> {
        self.data.as_ref()?.get("cause")?.as_str()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Failure reported by the approval store when resolving a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The id is not in the store.
    #[error("no pending approval with id {0}")]
    NotFound(String),
    /// The request was already accepted or rejected through another path.
    #[error("approval {0} was already resolved")]
    AlreadyResolved(String),
    /// Store-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Outbound seam to the approval store.
///
/// The triage engine terminates requests through this trait; the wallet's
/// approval controller implements it. Either call fails if the id is
/// unknown or the request was already resolved.
pub trait ApprovalResolver {
    /// Resolve the request successfully, delivering `payload` to the
    /// requester.
    fn accept(&mut self, id: &str, payload: Value) -> Result<(), ResolveError>;

    /// Resolve the request with an error.
    fn reject(&mut self, id: &str, error: ProviderError) -> Result<(), ResolveError>;
}

/// Configuration for a triage pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageOptions {
    /// Gates the snap-account-management branch of the classification
    /// policy. Off by default; with the flag off those kinds fall through
    /// to the reject branch.
    #[serde(rename = "keyringSnaps")]
    pub keyring_snaps: bool,
}

impl TriageOptions {
    /// Options with the keyring-snaps branch enabled.
    pub fn with_keyring_snaps() -> Self {
        Self { keyring_snaps: true }
    }
}

/// What the classification policy decided for one request kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TriageDecision {
    /// Resolve via `accept` with this payload.
    Accept {
        /// Value delivered to the requester.
        payload: Value,
        /// Whether the rendered UI interface (if any) should be deleted
        /// after the accept succeeds.
        clear_interface: bool,
    },
    /// Resolve via `reject` with the standardized user-rejection error.
    Reject,
}

impl TriageDecision {
    /// True when the decision resolves the request via `accept`.
    pub fn is_accept(&self) -> bool {
        matches!(self, TriageDecision::Accept { .. })
    }

    /// True when the decision rejects the request.
    pub fn is_reject(&self) -> bool {
        matches!(self, TriageDecision::Reject)
    }
}
