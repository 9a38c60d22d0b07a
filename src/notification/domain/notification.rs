//! Notification aggregate: a per-user message with a read receipt.

use super::{NotificationDomainError, ParseNotificationKindError};
use crate::board::domain::{BoardId, TaskId, UserId, uuid_id};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

uuid_id!(
    /// Unique identifier for a notification.
    NotificationId
);

/// What event a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The recipient was mentioned in a comment.
    Mention,
    /// The recipient was assigned a task.
    Assignment,
    /// A task the recipient cares about moved.
    Move,
    /// A comment was added to a task the recipient cares about.
    Comment,
    /// Some other change the recipient should see.
    Update,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::Assignment => "assignment",
            Self::Move => "move",
            Self::Comment => "comment",
            Self::Update => "update",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mention" => Ok(Self::Mention),
            "assignment" => Ok(Self::Assignment),
            "move" => Ok(Self::Move),
            "comment" => Ok(Self::Comment),
            "update" => Ok(Self::Update),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

/// One notification delivered to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    triggered_by: UserId,
    kind: NotificationKind,
    title: String,
    body: Option<String>,
    task_id: Option<TaskId>,
    board_id: Option<BoardId>,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedNotificationData {
    /// Persisted notification identifier.
    pub id: NotificationId,
    /// Recipient user.
    pub recipient: UserId,
    /// User whose action triggered the notification.
    pub triggered_by: UserId,
    /// Announced event kind.
    pub kind: NotificationKind,
    /// Persisted title.
    pub title: String,
    /// Persisted body, if any.
    pub body: Option<String>,
    /// Related task, if any.
    pub task_id: Option<TaskId>,
    /// Related board, if any.
    pub board_id: Option<BoardId>,
    /// When the recipient read the notification, if they have.
    pub read_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new unread notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::EmptyTitle`] when the title is
    /// empty after trimming.
    pub fn new(
        recipient: UserId,
        triggered_by: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, NotificationDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NotificationDomainError::EmptyTitle);
        }

        Ok(Self {
            id: NotificationId::new(),
            recipient,
            triggered_by,
            kind,
            title: trimmed.to_owned(),
            body: None,
            task_id: None,
            board_id: None,
            read_at: None,
            created_at: clock.utc(),
        })
    }

    /// Sets the notification body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Links the notification to a task.
    #[must_use]
    pub const fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Links the notification to a board.
    #[must_use]
    pub const fn with_board(mut self, board_id: BoardId) -> Self {
        self.board_id = Some(board_id);
        self
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            recipient: data.recipient,
            triggered_by: data.triggered_by,
            kind: data.kind,
            title: data.title,
            body: data.body,
            task_id: data.task_id,
            board_id: data.board_id,
            read_at: data.read_at,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient user.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the user whose action triggered the notification.
    #[must_use]
    pub const fn triggered_by(&self) -> UserId {
        self.triggered_by
    }

    /// Returns the announced event kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the related task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the related board, if any.
    #[must_use]
    pub const fn board_id(&self) -> Option<BoardId> {
        self.board_id
    }

    /// Returns when the recipient read the notification, if they have.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Returns whether the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification read at the given instant.
    ///
    /// Idempotent: the first read receipt wins and later calls leave it
    /// untouched.
    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        if self.read_at.is_none() {
            self.read_at = Some(now);
        }
    }
}
