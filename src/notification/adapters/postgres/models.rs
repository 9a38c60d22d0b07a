//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: uuid::Uuid,
    pub recipient: uuid::Uuid,
    pub triggered_by: uuid::Uuid,
    pub kind: String,
    pub title: String,
    pub body: Option<String>,
    pub task_id: Option<uuid::Uuid>,
    pub board_id: Option<uuid::Uuid>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert model for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow {
    pub id: uuid::Uuid,
    pub recipient: uuid::Uuid,
    pub triggered_by: uuid::Uuid,
    pub kind: String,
    pub title: String,
    pub body: Option<String>,
    pub task_id: Option<uuid::Uuid>,
    pub board_id: Option<uuid::Uuid>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
