//! Conversion tests between history entries and Diesel rows.

use super::fixtures::{FixedClock, base_time};
use crate::board::domain::{TaskId, UserId};
use crate::history::{
    adapters::postgres::{HistoryEntryRow, entry_to_new_row, row_to_entry},
    domain::{HistoryAction, HistoryEntry},
};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
fn entry_round_trips_through_rows() {
    let clock = FixedClock(base_time());
    let original = HistoryEntry::new(TaskId::new(), UserId::new(), HistoryAction::Moved, &clock)
        .with_field("column")
        .with_change(Some("A Fazer".to_owned()), Some("Aprovação".to_owned()));

    let new_row = entry_to_new_row(&original);
    let restored = row_to_entry(HistoryEntryRow {
        id: new_row.id,
        task_id: new_row.task_id,
        actor: new_row.actor,
        action: new_row.action,
        field: new_row.field,
        old_value: new_row.old_value,
        new_value: new_row.new_value,
        recorded_at: new_row.recorded_at,
        seq: 1,
    })
    .expect("row converts");

    assert_eq!(restored, original);
}

#[rstest]
fn unknown_action_is_a_persistence_error() {
    let row = HistoryEntryRow {
        id: Uuid::new_v4(),
        task_id: Uuid::new_v4(),
        actor: Uuid::new_v4(),
        action: "archived".to_owned(),
        field: None,
        old_value: None,
        new_value: None,
        recorded_at: base_time(),
        seq: 1,
    };

    assert!(row_to_entry(row).is_err());
}
