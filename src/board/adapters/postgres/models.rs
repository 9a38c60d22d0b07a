//! Diesel row models for board-context persistence.

use super::schema::{attachments, boards, columns, comments, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BoardRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: Option<String>,
    pub area_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert model for board records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub(crate) struct NewBoardRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: Option<String>,
    pub area_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ColumnRow {
    pub id: uuid::Uuid,
    pub board_id: uuid::Uuid,
    pub name: String,
    pub color: String,
    pub position: i32,
    pub stage_key: Option<String>,
    pub sla_hours: Option<i32>,
    pub wip_limit: Option<i32>,
}

/// Insert model for column records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = columns)]
pub(crate) struct NewColumnRow {
    pub id: uuid::Uuid,
    pub board_id: uuid::Uuid,
    pub name: String,
    pub color: String,
    pub position: i32,
    pub stage_key: Option<String>,
    pub sla_hours: Option<i32>,
    pub wip_limit: Option<i32>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: uuid::Uuid,
    pub board_id: uuid::Uuid,
    pub column_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<uuid::Uuid>,
    pub tags: Value,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub reference_links: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert/update model for task records.
///
/// The changeset writes every column: a task update is a full-row write,
/// matching the aggregate-at-a-time port contract.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow {
    pub id: uuid::Uuid,
    pub board_id: uuid::Uuid,
    pub column_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<uuid::Uuid>,
    pub tags: Value,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub reference_links: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub author: uuid::Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model for comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub author: uuid::Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Query result row for attachment metadata records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttachmentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub file_name: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub uploaded_by: uuid::Uuid,
    pub storage_pointer: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model for attachment metadata records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attachments)]
pub(crate) struct NewAttachmentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub file_name: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub uploaded_by: uuid::Uuid,
    pub storage_pointer: String,
    pub created_at: DateTime<Utc>,
}
