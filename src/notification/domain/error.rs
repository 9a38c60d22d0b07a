//! Domain errors for the notification context.

use thiserror::Error;

/// Validation failures when constructing notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationDomainError {
    /// The notification title is empty after trimming.
    #[error("notification title must not be empty")]
    EmptyTitle,
}

/// Raised when a stored kind string is not a known
/// [`super::NotificationKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);
