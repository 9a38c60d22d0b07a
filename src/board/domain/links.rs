//! Merge-preserving reference-links blob attached to each task.

use super::{ApprovalState, ApprovalStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schemaless structured blob carried on every task.
///
/// The engine understands exactly one key, `client_approval`; every other
/// key written by surrounding systems is preserved verbatim across reads
/// and writes, so stamping the approval record never clobbers unrelated
/// transition metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    client_approval: Option<ApprovalState>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ReferenceLinks {
    /// Returns the client-approval record, if stamped.
    #[must_use]
    pub const fn client_approval(&self) -> Option<&ApprovalState> {
        self.client_approval.as_ref()
    }

    /// Returns the keys the engine does not interpret.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Arms the client-approval window.
    ///
    /// First `requested_at` wins: an existing record keeps its request time
    /// and deadline; a fresh record is requested at `now` and its deadline
    /// derives from the column SLA (default
    /// [`DEFAULT_SLA_HOURS`](super::DEFAULT_SLA_HOURS)).
    pub(crate) fn arm_approval(&mut self, now: DateTime<Utc>, sla_hours: Option<u32>) {
        let approval = self
            .client_approval
            .get_or_insert_with(|| ApprovalState::requested(now));
        approval.arm(sla_hours);
    }

    /// Records the external approval decision on an armed window.
    ///
    /// Returns false when no window exists to resolve.
    pub(crate) fn resolve_approval(&mut self, status: ApprovalStatus) -> bool {
        match self.client_approval.as_mut() {
            Some(approval) => {
                approval.resolve(status);
                true
            }
            None => false,
        }
    }

    /// Reconstructs a blob from persisted parts.
    #[must_use]
    pub const fn from_parts(
        client_approval: Option<ApprovalState>,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            client_approval,
            extra,
        }
    }
}
