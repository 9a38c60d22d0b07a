//! Append-only audit entries for task lifecycle changes.

use super::ParseHistoryActionError;
use crate::board::domain::{TaskId, UserId, uuid_id};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

uuid_id!(
    /// Unique identifier for a history entry.
    HistoryEntryId
);

/// What kind of change a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// The task was created.
    Created,
    /// The task moved between columns or positions.
    Moved,
    /// The assignee changed.
    Assigned,
    /// The priority changed.
    PriorityChanged,
    /// The due date changed.
    DueDateChanged,
    /// Some other field changed.
    Updated,
}

impl HistoryAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Moved => "moved",
            Self::Assigned => "assigned",
            Self::PriorityChanged => "priority_changed",
            Self::DueDateChanged => "due_date_changed",
            Self::Updated => "updated",
        }
    }
}

impl TryFrom<&str> for HistoryAction {
    type Error = ParseHistoryActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "moved" => Ok(Self::Moved),
            "assigned" => Ok(Self::Assigned),
            "priority_changed" => Ok(Self::PriorityChanged),
            "due_date_changed" => Ok(Self::DueDateChanged),
            "updated" => Ok(Self::Updated),
            _ => Err(ParseHistoryActionError(value.to_owned())),
        }
    }
}

/// One immutable audit record.
///
/// Entries are never edited after recording; the trail for a task is the
/// ordered sequence of its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    actor: UserId,
    action: HistoryAction,
    field: Option<String>,
    old_value: Option<String>,
    new_value: Option<String>,
    recorded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedHistoryEntryData {
    /// Persisted entry identifier.
    pub id: HistoryEntryId,
    /// Task the entry belongs to.
    pub task_id: TaskId,
    /// User who made the change.
    pub actor: UserId,
    /// Kind of change recorded.
    pub action: HistoryAction,
    /// Changed field name, if the action names one.
    pub field: Option<String>,
    /// Value before the change, if captured.
    pub old_value: Option<String>,
    /// Value after the change, if captured.
    pub new_value: Option<String>,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates a new entry stamped with the current clock time.
    #[must_use]
    pub fn new(task_id: TaskId, actor: UserId, action: HistoryAction, clock: &impl Clock) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            actor,
            action,
            field: None,
            old_value: None,
            new_value: None,
            recorded_at: clock.utc(),
        }
    }

    /// Names the changed field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Captures the before/after values of the change.
    #[must_use]
    pub fn with_change(
        mut self,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        self.old_value = old_value;
        self.new_value = new_value;
        self
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryEntryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            actor: data.actor,
            action: data.action,
            field: data.field,
            old_value: data.old_value,
            new_value: data.new_value,
            recorded_at: data.recorded_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the user who made the change.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the kind of change recorded.
    #[must_use]
    pub const fn action(&self) -> HistoryAction {
        self.action
    }

    /// Returns the changed field name, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the value before the change, if captured.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the value after the change, if captured.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Returns when the change was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
