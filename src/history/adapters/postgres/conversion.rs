//! Row ↔ domain conversions for history persistence.

use super::models::{HistoryEntryRow, NewHistoryEntryRow};
use crate::board::domain::{TaskId, UserId};
use crate::history::{
    domain::{HistoryAction, HistoryEntry, HistoryEntryId, PersistedHistoryEntryData},
    ports::{HistoryRepositoryError, HistoryRepositoryResult},
};

pub(crate) fn row_to_entry(row: HistoryEntryRow) -> HistoryRepositoryResult<HistoryEntry> {
    let action =
        HistoryAction::try_from(row.action.as_str()).map_err(HistoryRepositoryError::persistence)?;

    Ok(HistoryEntry::from_persisted(PersistedHistoryEntryData {
        id: HistoryEntryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        actor: UserId::from_uuid(row.actor),
        action,
        field: row.field,
        old_value: row.old_value,
        new_value: row.new_value,
        recorded_at: row.recorded_at,
    }))
}

pub(crate) fn entry_to_new_row(entry: &HistoryEntry) -> NewHistoryEntryRow {
    NewHistoryEntryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        actor: entry.actor().into_inner(),
        action: entry.action().as_str().to_owned(),
        field: entry.field().map(str::to_owned),
        old_value: entry.old_value().map(str::to_owned),
        new_value: entry.new_value().map(str::to_owned),
        recorded_at: entry.recorded_at(),
    }
}
