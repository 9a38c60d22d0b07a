//! Row ↔ domain conversions for notification persistence.

use super::models::{NewNotificationRow, NotificationRow};
use crate::board::domain::{BoardId, TaskId, UserId};
use crate::notification::{
    domain::{Notification, NotificationId, NotificationKind, PersistedNotificationData},
    ports::{NotificationRepositoryError, NotificationRepositoryResult},
};

pub(crate) fn row_to_notification(
    row: NotificationRow,
) -> NotificationRepositoryResult<Notification> {
    let kind = NotificationKind::try_from(row.kind.as_str())
        .map_err(NotificationRepositoryError::persistence)?;

    Ok(Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        recipient: UserId::from_uuid(row.recipient),
        triggered_by: UserId::from_uuid(row.triggered_by),
        kind,
        title: row.title,
        body: row.body,
        task_id: row.task_id.map(TaskId::from_uuid),
        board_id: row.board_id.map(BoardId::from_uuid),
        read_at: row.read_at,
        created_at: row.created_at,
    }))
}

pub(crate) fn notification_to_new_row(notification: &Notification) -> NewNotificationRow {
    NewNotificationRow {
        id: notification.id().into_inner(),
        recipient: notification.recipient().into_inner(),
        triggered_by: notification.triggered_by().into_inner(),
        kind: notification.kind().as_str().to_owned(),
        title: notification.title().to_owned(),
        body: notification.body().map(str::to_owned),
        task_id: notification.task_id().map(TaskId::into_inner),
        board_id: notification.board_id().map(BoardId::into_inner),
        read_at: notification.read_at(),
        created_at: notification.created_at(),
    }
}
