//! In-memory notification store for tests and ephemeral deployments.

use crate::board::domain::UserId;
use crate::notification::domain::{Notification, NotificationId};
use crate::notification::ports::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory implementation of [`NotificationRepository`].
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    notifications: Arc<RwLock<HashMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(
        "notification store lock poisoned",
    ))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationStore {
    async fn create(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(|_| poisoned())?;
        notifications.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn find(&self, id: NotificationId) -> NotificationRepositoryResult<Option<Notification>> {
        let notifications = self.notifications.read().map_err(|_| poisoned())?;
        Ok(notifications.get(&id).cloned())
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(|_| poisoned())?;
        let mut result: Vec<Notification> = notifications
            .values()
            .filter(|notification| notification.recipient() == recipient)
            .filter(|notification| !unread_only || !notification.is_read())
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(result)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Notification> {
        let mut notifications = self.notifications.write().map_err(|_| poisoned())?;
        let notification = notifications
            .get_mut(&id)
            .ok_or(NotificationRepositoryError::NotificationNotFound(id))?;
        notification.mark_read(now);
        Ok(notification.clone())
    }

    async fn mark_all_read(
        &self,
        recipient: UserId,
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<u64> {
        let mut notifications = self.notifications.write().map_err(|_| poisoned())?;
        let mut newly_read = 0_u64;
        for notification in notifications.values_mut() {
            if notification.recipient() == recipient && !notification.is_read() {
                notification.mark_read(now);
                newly_read += 1;
            }
        }
        Ok(newly_read)
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(|_| poisoned())?;
        notifications
            .remove(&id)
            .ok_or(NotificationRepositoryError::NotificationNotFound(id))?;
        Ok(())
    }
}
