//! Diesel row models for history persistence.

use super::schema::history_entries;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for history entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = history_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryEntryRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub actor: uuid::Uuid,
    pub action: String,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub recorded_at: DateTime<Utc>,
    #[expect(dead_code, reason = "seq is ordering-only; the domain never reads it")]
    pub seq: i64,
}

/// Insert model for history entries. `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history_entries)]
pub(crate) struct NewHistoryEntryRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub actor: uuid::Uuid,
    pub action: String,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
