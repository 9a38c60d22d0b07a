//! Client-approval window stamped when a task enters an approval stage.

use super::ParseApprovalStatusError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Approval window applied when a column declares no SLA of its own.
pub const DEFAULT_SLA_HOURS: u32 = 48;

/// Resolution state of a client-approval window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Approval has been requested and awaits a decision.
    Pending,
    /// The client approved the work.
    Approved,
    /// The client rejected the work.
    Rejected,
}

impl ApprovalStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for ApprovalStatus {
    type Error = ParseApprovalStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApprovalStatusError(value.to_owned())),
        }
    }
}

/// SLA-bound approval record carried inside a task's reference links.
///
/// `requested_at` is stamped exactly once, the first time the task enters an
/// approval stage; `due_at` derives from `requested_at` (never from the
/// current time) and is likewise never overwritten once set. Re-entering an
/// approval lane only flips the status back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalState {
    status: ApprovalStatus,
    requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_at: Option<DateTime<Utc>>,
}

impl ApprovalState {
    /// Opens a window requested at the given instant, with no deadline yet.
    pub(crate) const fn requested(requested_at: DateTime<Utc>) -> Self {
        Self {
            status: ApprovalStatus::Pending,
            requested_at,
            due_at: None,
        }
    }

    /// Reconstructs an approval record from persisted parts.
    #[must_use]
    pub const fn from_parts(
        status: ApprovalStatus,
        requested_at: DateTime<Utc>,
        due_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            status,
            requested_at,
            due_at,
        }
    }

    /// Marks the window pending and derives the deadline from the original
    /// request time when none is set. An existing deadline always wins.
    pub(crate) fn arm(&mut self, sla_hours: Option<u32>) {
        self.status = ApprovalStatus::Pending;
        if self.due_at.is_none() {
            let window = i64::from(sla_hours.unwrap_or(DEFAULT_SLA_HOURS));
            self.due_at = Some(self.requested_at + Duration::hours(window));
        }
    }

    /// Records the external approval decision.
    pub(crate) const fn resolve(&mut self, status: ApprovalStatus) {
        self.status = status;
    }

    /// Returns the resolution status.
    #[must_use]
    pub const fn status(&self) -> ApprovalStatus {
        self.status
    }

    /// Returns the instant approval was first requested.
    #[must_use]
    pub const fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Returns the approval deadline, if armed.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }
}
