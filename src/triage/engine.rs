//! Bulk triage over pending approval requests.
//!
//! Walks a snapshot of the approval queue and terminates every request
//! according to a fixed classification policy: informational snap dialogs
//! are accepted with a null payload, decision-style dialogs are accepted
//! with `false`, and everything else is rejected with the standardized
//! user-rejection error.
//!
//! The policy is checked per request, first match wins, and each request is
//! resolved independently: a store failure on one id is logged and does not
//! stop the rest of the pass.

use crate::triage::types::*;
use serde_json::Value;

/// Classification engine for bulk approval cleanup.
///
/// Created once from [`TriageOptions`], then reused for any number of
/// passes. Holds no state between passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalTriage {
    options: TriageOptions,
}

impl ApprovalTriage {
    pub fn new(options: TriageOptions) -> Self {
        Self { options }
    }

    /// The classification policy, exposed for callers that want the verdict
    /// for a kind without performing side effects.
    ///
    /// Checked in order, first match wins:
    /// 1. alert/prompt/default snap dialogs accept with `null` and clear
    ///    their UI interface,
    /// 2. confirmation snap dialogs accept with `false` and clear their UI
    ///    interface,
    /// 3. account-management confirmations accept with `false` when the
    ///    keyring-snaps flag is on (no interface to clear),
    /// 4. everything else is rejected.
    pub fn classify(&self, kind: &ApprovalKind) -> TriageDecision {
        if kind.is_informational_dialog() {
            return TriageDecision::Accept {
                payload: Value::Null,
                clear_interface: true,
            };
        }
        if *kind == ApprovalKind::SnapDialogConfirmation {
            return TriageDecision::Accept {
                payload: Value::Bool(false),
                clear_interface: true,
            };
        }
        if self.options.keyring_snaps && kind.is_account_management() {
            return TriageDecision::Accept {
                payload: Value::Bool(false),
                clear_interface: false,
            };
        }
        TriageDecision::Reject
    }

    /// Terminate every request in the snapshot.
    ///
    /// Requests are processed in snapshot order. `delete_interface` is
    /// invoked fire-and-forget for accepted snap dialogs whose payload
    /// carries an interface id; this engine does not wait on it.
    pub fn reject_all<R: ApprovalResolver>(
        &self,
        resolver: &mut R,
        requests: &[PendingApproval],
        delete_interface: Option<&dyn Fn(&str)>,
    ) {
        for request in requests {
            self.resolve_one(resolver, request, delete_interface);
        }
    }

    /// Terminate only the requests made by `origin`.
    ///
    /// Matching is exact and case-sensitive; requests without an origin
    /// never match. Non-matching requests are left pending, with no
    /// resolver call at all.
    pub fn reject_origin<R: ApprovalResolver>(
        &self,
        resolver: &mut R,
        requests: &[PendingApproval],
        origin: &str,
        delete_interface: Option<&dyn Fn(&str)>,
    ) {
        for request in requests {
            if request.origin.as_deref() == Some(origin) {
                self.resolve_one(resolver, request, delete_interface);
            }
        }
    }

    /// Apply the policy to a single request.
    ///
    /// Exactly one accept-or-reject call is attempted. Interface deletion
    /// happens only after a successful accept. A store failure (unknown id,
    /// already resolved) is logged and swallowed so one contested request
    /// cannot block cleanup of the others.
    fn resolve_one<R: ApprovalResolver>(
        &self,
        resolver: &mut R,
        request: &PendingApproval,
        delete_interface: Option<&dyn Fn(&str)>,
    ) {
        let outcome = match self.classify(&request.kind) {
            TriageDecision::Accept {
                payload,
                clear_interface,
            } => {
                let result = resolver.accept(&request.id, payload);
                if result.is_ok() && clear_interface {
                    if let (Some(delete), Some(interface)) =
                        (delete_interface, request.interface_id())
                    {
                        delete(interface);
                    }
                }
                result
            }
            TriageDecision::Reject => {
                resolver.reject(&request.id, ProviderError::rejected_in_bulk())
            }
        };

        if let Err(e) = outcome {
            tracing::warn!("Failed to resolve approval {}: {}", request.id, e);
        }
    }
}
