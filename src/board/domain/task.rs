//! Task aggregate root and related workflow types.

use super::{
    ApprovalStatus, BoardDomainError, BoardId, ColumnId, ParsePriorityError, ParseTaskStatusError,
    ReferenceLinks, TaskId, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Lowest urgency.
    Low,
    /// Default urgency.
    Medium,
    /// Elevated urgency.
    High,
    /// Highest urgency.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Canonical task status, derived from the column the task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet scheduled.
    Backlog,
    /// Scheduled but not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review or approval.
    InReview,
    /// Completed.
    Done,
    /// Blocked on an external dependency.
    Blocked,
    /// Abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// A task belongs to exactly one column at any instant; moving it is a
/// transfer of ownership performed by the ordering engine. `position` is the
/// dense zero-based rank of the task within its column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    board_id: BoardId,
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    assigned_to: Option<UserId>,
    tags: BTreeSet<String>,
    position: u32,
    due_date: Option<DateTime<Utc>>,
    reference_links: ReferenceLinks,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning board identifier.
    pub board_id: BoardId,
    /// Owning column identifier.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted column-derived status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted tag set.
    pub tags: BTreeSet<String>,
    /// Persisted dense position within the column.
    pub position: u32,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted reference-links blob.
    pub reference_links: ReferenceLinks,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at the given column position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        board_id: BoardId,
        column_id: ColumnId,
        title: impl Into<String>,
        priority: TaskPriority,
        status: TaskStatus,
        position: u32,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let validated = validate_title(title.into())?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            board_id,
            column_id,
            title: validated,
            description: None,
            priority,
            status,
            assigned_to: None,
            tags: BTreeSet::new(),
            position,
            due_date: None,
            reference_links: ReferenceLinks::default(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets the initial tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the initial due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assigned_to: data.assigned_to,
            tags: data.tags,
            position: data.position,
            due_date: data.due_date,
            reference_links: data.reference_links,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the owning column identifier.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the column-derived status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns the dense position within the owning column.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the reference-links blob.
    #[must_use]
    pub const fn reference_links(&self) -> &ReferenceLinks {
        &self.reference_links
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the new title is
    /// empty after trimming.
    pub fn rename(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        self.title = validate_title(title.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the task description.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Changes the task priority.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the tag set.
    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = String>, clock: &impl Clock) {
        self.tags = tags.into_iter().collect();
        self.touch(clock);
    }

    /// Assigns or unassigns the task.
    pub fn assign(&mut self, assignee: Option<UserId>, clock: &impl Clock) {
        self.assigned_to = assignee;
        self.touch(clock);
    }

    /// Replaces the due date.
    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>, clock: &impl Clock) {
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Transfers the task to a column at a dense position with the status
    /// resolved for that column.
    pub fn relocate(
        &mut self,
        column_id: ColumnId,
        position: u32,
        status: TaskStatus,
        clock: &impl Clock,
    ) {
        self.column_id = column_id;
        self.position = position;
        self.status = status;
        self.touch(clock);
    }

    /// Re-ranks the task within its current column.
    ///
    /// Renumbering neighbours of a moved task is positional bookkeeping, not
    /// a mutation of the task itself, so `updated_at` is left untouched.
    pub const fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    /// Arms the client-approval window for this task.
    ///
    /// See [`ReferenceLinks::arm_approval`] for the first-request-wins
    /// semantics.
    pub fn enter_approval(&mut self, sla_hours: Option<u32>, clock: &impl Clock) {
        self.reference_links.arm_approval(clock.utc(), sla_hours);
    }

    /// Records the external approval decision.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NoApprovalWindow`] when the task has
    /// never entered an approval stage.
    pub fn resolve_approval(
        &mut self,
        status: ApprovalStatus,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        if !self.reference_links.resolve_approval(status) {
            return Err(BoardDomainError::NoApprovalWindow(self.id));
        }
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims and validates a task title.
fn validate_title(raw: String) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTaskTitle);
    }
    Ok(trimmed.to_owned())
}
