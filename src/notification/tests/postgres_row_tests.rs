//! Conversion tests between notifications and Diesel rows.

use super::fixtures::{FixedClock, base_time};
use crate::board::domain::{BoardId, TaskId, UserId};
use crate::notification::{
    adapters::postgres::{NotificationRow, notification_to_new_row, row_to_notification},
    domain::{Notification, NotificationKind},
};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
fn notification_round_trips_through_rows() {
    let clock = FixedClock(base_time());
    let original = Notification::new(
        UserId::new(),
        UserId::new(),
        NotificationKind::Move,
        "Task moved: Relatório",
        &clock,
    )
    .expect("valid title")
    .with_body("Moved to Aprovação")
    .with_task(TaskId::new())
    .with_board(BoardId::new());

    let new_row = notification_to_new_row(&original);
    let restored = row_to_notification(NotificationRow {
        id: new_row.id,
        recipient: new_row.recipient,
        triggered_by: new_row.triggered_by,
        kind: new_row.kind,
        title: new_row.title,
        body: new_row.body,
        task_id: new_row.task_id,
        board_id: new_row.board_id,
        read_at: new_row.read_at,
        created_at: new_row.created_at,
    })
    .expect("row converts");

    assert_eq!(restored, original);
}

#[rstest]
fn unknown_kind_is_a_persistence_error() {
    let row = NotificationRow {
        id: Uuid::new_v4(),
        recipient: Uuid::new_v4(),
        triggered_by: Uuid::new_v4(),
        kind: "digest".to_owned(),
        title: "Resumo semanal".to_owned(),
        body: None,
        task_id: None,
        board_id: None,
        read_at: None,
        created_at: base_time(),
    };

    assert!(row_to_notification(row).is_err());
}
