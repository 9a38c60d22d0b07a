//! Notification dispatcher: persists notifications and fans them out to
//! live per-user feeds.

use crate::board::domain::{BoardId, TaskId, UserId};
use crate::notification::{
    domain::{Notification, NotificationDomainError, NotificationId, NotificationKind},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;

/// Buffered notifications per live feed; slow subscribers lose the oldest.
const FEED_CAPACITY: usize = 64;

/// Errors raised by the notification dispatcher.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The notification failed domain validation.
    #[error(transparent)]
    Domain(#[from] NotificationDomainError),

    /// The underlying repository failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),

    /// The live-feed registry is unavailable.
    #[error("notification feed unavailable: {0}")]
    Feed(String),
}

/// Request to dispatch one notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyRequest {
    recipient: UserId,
    triggered_by: UserId,
    kind: NotificationKind,
    title: String,
    body: Option<String>,
    task_id: Option<TaskId>,
    board_id: Option<BoardId>,
}

impl NotifyRequest {
    /// Creates a request for the given recipient, kind, and title,
    /// attributed to the user whose action triggered it.
    #[must_use]
    pub fn new(
        recipient: UserId,
        triggered_by: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            triggered_by,
            kind,
            title: title.into(),
            body: None,
            task_id: None,
            board_id: None,
        }
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
}

/// Application service persisting notifications and pushing them onto live
/// per-user broadcast feeds.
#[derive(Debug)]
pub struct NotificationDispatcher<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
    feeds: Arc<RwLock<HashMap<UserId, broadcast::Sender<Notification>>>>,
}

impl<R, C> Clone for NotificationDispatcher<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            feeds: Arc::clone(&self.feeds),
        }
    }
}

impl<R, C> NotificationDispatcher<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over the given repository and clock.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            feeds: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Persists a notification and pushes it to the recipient's live feed.
    ///
    /// A recipient without live subscribers still gets the stored
    /// notification; the feed push is fire-and-forget.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Domain`] when the title is empty and
    /// [`DispatchError::Repository`] when the store write fails.
    pub async fn notify(&self, request: NotifyRequest) -> Result<Notification, DispatchError> {
        let mut notification = Notification::new(
            request.recipient,
            request.triggered_by,
            request.kind,
            request.title,
            self.clock.as_ref(),
        )?;
        if let Some(body) = request.body {
            notification = notification.with_body(body);
        }
        if let Some(task_id) = request.task_id {
            notification = notification.with_task(task_id);
        }
        if let Some(board_id) = request.board_id {
            notification = notification.with_board(board_id);
        }

        self.repository.create(&notification).await?;
        self.push_to_feed(&notification)?;
        Ok(notification)
    }

    /// Dispatches a notification, logging instead of failing.
    ///
    /// Side-channel announcements must never veto the operation that
    /// triggered them.
    pub async fn notify_best_effort(&self, request: NotifyRequest) -> Option<Notification> {
        match self.notify(request).await {
            Ok(notification) => Some(notification),
            Err(err) => {
                tracing::warn!(error = %err, "failed to dispatch notification");
                None
            }
        }
    }

    /// Subscribes to a recipient's live feed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Feed`] when the feed registry lock is
    /// poisoned.
    pub fn subscribe(
        &self,
        recipient: UserId,
    ) -> Result<broadcast::Receiver<Notification>, DispatchError> {
        let mut feeds = self
            .feeds
            .write()
            .map_err(|_| DispatchError::Feed("feed registry lock poisoned".to_owned()))?;
        let sender = feeds
            .entry(recipient)
            .or_insert_with(|| broadcast::channel(FEED_CAPACITY).0);
        Ok(sender.subscribe())
    }

    /// Returns a recipient's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Repository`] when the read fails.
    pub async fn notifications_for(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DispatchError> {
        Ok(self
            .repository
            .list_for_recipient(recipient, unread_only)
            .await?)
    }

    /// Marks one notification read. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Repository`] when the notification does not
    /// exist or the write fails.
    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification, DispatchError> {
        Ok(self.repository.mark_read(id, self.clock.utc()).await?)
    }

    /// Marks every unread notification of a recipient read, returning how
    /// many were newly read.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Repository`] when the write fails.
    pub async fn mark_all_read(&self, recipient: UserId) -> Result<u64, DispatchError> {
        Ok(self
            .repository
            .mark_all_read(recipient, self.clock.utc())
            .await?)
    }

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Repository`] when the notification does not
    /// exist or the write fails.
    pub async fn delete(&self, id: NotificationId) -> Result<(), DispatchError> {
        Ok(self.repository.delete(id).await?)
    }

    fn push_to_feed(&self, notification: &Notification) -> Result<(), DispatchError> {
        let feeds = self
            .feeds
            .read()
            .map_err(|_| DispatchError::Feed("feed registry lock poisoned".to_owned()))?;
        if let Some(sender) = feeds.get(&notification.recipient()) {
            // A send error only means no live subscribers remain.
            drop(sender.send(notification.clone()));
        }
        Ok(())
    }
}
