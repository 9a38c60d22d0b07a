//! `PostgreSQL` store implementation for notification persistence.

use super::conversion::{notification_to_new_row, row_to_notification};
use super::models::NotificationRow;
use super::schema::notifications;
use crate::board::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed implementation of [`NotificationRepository`].
#[derive(Debug, Clone)]
pub struct PostgresNotificationStore {
    pool: NotificationPgPool,
}

impl PostgresNotificationStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationStore {
    async fn create(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let new_row = notification_to_new_row(notification);

        self.run(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find(&self, id: NotificationId) -> NotificationRepositoryResult<Option<Notification>> {
        self.run(move |connection| {
            let row = notifications::table
                .find(id.into_inner())
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()
                .map_err(NotificationRepositoryError::persistence)?;
            row.map(row_to_notification).transpose()
        })
        .await
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        self.run(move |connection| {
            let mut query = notifications::table
                .filter(notifications::recipient.eq(recipient.into_inner()))
                .order(notifications::created_at.desc())
                .select(NotificationRow::as_select())
                .into_boxed();
            if unread_only {
                query = query.filter(notifications::read_at.is_null());
            }

            let rows = query
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Notification> {
        self.run(move |connection| {
            // Stamps only while unread; an already-read notification keeps
            // its original receipt.
            diesel::update(
                notifications::table
                    .find(id.into_inner())
                    .filter(notifications::read_at.is_null()),
            )
            .set(notifications::read_at.eq(Some(now)))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)?;

            let row = notifications::table
                .find(id.into_inner())
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()
                .map_err(NotificationRepositoryError::persistence)?
                .ok_or(NotificationRepositoryError::NotificationNotFound(id))?;
            row_to_notification(row)
        })
        .await
    }

    async fn mark_all_read(
        &self,
        recipient: UserId,
        now: DateTime<Utc>,
    ) -> NotificationRepositoryResult<u64> {
        self.run(move |connection| {
            let updated = diesel::update(
                notifications::table
                    .filter(notifications::recipient.eq(recipient.into_inner()))
                    .filter(notifications::read_at.is_null()),
            )
            .set(notifications::read_at.eq(Some(now)))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)?;
            Ok(u64::try_from(updated).unwrap_or(u64::MAX))
        })
        .await
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        self.run(move |connection| {
            let deleted = diesel::delete(notifications::table.find(id.into_inner()))
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(NotificationRepositoryError::NotificationNotFound(id));
            }
            Ok(())
        })
        .await
    }
}
