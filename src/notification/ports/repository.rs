//! Repository port for notification persistence.

use crate::board::domain::UserId;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Persistence contract for notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a new notification.
    async fn create(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Finds a notification by identifier. Returns `None` when absent.
    async fn find(&self, id: NotificationId) -> NotificationRepositoryResult<Option<Notification>>;

    /// Returns a recipient's notifications, newest first, optionally
    /// restricted to unread ones.
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Stamps a read receipt on one notification and returns it.
    ///
    /// Idempotent: an already-read notification keeps its original receipt.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotificationNotFound`] when the
    /// notification does not exist.
    async fn mark_read(
        &self,
        id: NotificationId,
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Notification>;

    /// Stamps a read receipt on every unread notification of a recipient,
    /// returning how many were newly read.
    async fn mark_all_read(
        &self,
        recipient: UserId,
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<u64>;

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotificationNotFound`] when the
    /// notification does not exist.
    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
