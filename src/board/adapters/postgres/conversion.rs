//! Row ↔ domain conversions for board-context persistence.

use super::models::{
    AttachmentRow, BoardRow, ColumnRow, CommentRow, NewAttachmentRow, NewBoardRow, NewColumnRow,
    NewCommentRow, NewTaskRow, TaskRow,
};
use crate::board::{
    domain::{
        Attachment, AttachmentId, Board, BoardId, Column, ColumnId, Comment, CommentId,
        PersistedAttachmentData, PersistedBoardData, PersistedColumnData, PersistedCommentData,
        PersistedTaskData, ReferenceLinks, Task, TaskId, TaskPriority, TaskStatus, UserId,
    },
    ports::{BoardRepositoryError, BoardRepositoryResult, TaskRepositoryError,
        TaskRepositoryResult},
};
use std::collections::BTreeSet;

pub(crate) fn row_to_board(row: BoardRow) -> Board {
    Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        area_key: row.area_key,
        created_at: row.created_at,
    })
}

pub(crate) fn board_to_new_row(board: &Board) -> NewBoardRow {
    NewBoardRow {
        id: board.id().into_inner(),
        name: board.name().to_owned(),
        description: board.description().map(str::to_owned),
        area_key: board.area_key().map(str::to_owned),
        created_at: board.created_at(),
    }
}

pub(crate) fn row_to_column(row: ColumnRow) -> BoardRepositoryResult<Column> {
    let position = u32::try_from(row.position).map_err(BoardRepositoryError::persistence)?;
    let sla_hours = row
        .sla_hours
        .map(u32::try_from)
        .transpose()
        .map_err(BoardRepositoryError::persistence)?;
    let wip_limit = row
        .wip_limit
        .map(u32::try_from)
        .transpose()
        .map_err(BoardRepositoryError::persistence)?;

    Ok(Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        name: row.name,
        color: row.color,
        position,
        stage_key: row.stage_key,
        sla_hours,
        wip_limit,
    }))
}

pub(crate) fn column_to_new_row(column: &Column) -> BoardRepositoryResult<NewColumnRow> {
    let position = i32::try_from(column.position()).map_err(BoardRepositoryError::persistence)?;
    let sla_hours = column
        .sla_hours()
        .map(i32::try_from)
        .transpose()
        .map_err(BoardRepositoryError::persistence)?;
    let wip_limit = column
        .wip_limit()
        .map(i32::try_from)
        .transpose()
        .map_err(BoardRepositoryError::persistence)?;

    Ok(NewColumnRow {
        id: column.id().into_inner(),
        board_id: column.board_id().into_inner(),
        name: column.name().to_owned(),
        color: column.color().to_owned(),
        position,
        stage_key: column.stage_key().map(str::to_owned),
        sla_hours,
        wip_limit,
    })
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let position = u32::try_from(row.position).map_err(TaskRepositoryError::persistence)?;
    let tags: BTreeSet<String> =
        serde_json::from_value(row.tags).map_err(TaskRepositoryError::persistence)?;
    let reference_links: ReferenceLinks =
        serde_json::from_value(row.reference_links).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        column_id: ColumnId::from_uuid(row.column_id),
        title: row.title,
        description: row.description,
        priority,
        status,
        assigned_to: row.assigned_to.map(UserId::from_uuid),
        tags,
        position,
        due_date: row.due_date,
        reference_links,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(crate) fn task_to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let position = i32::try_from(task.position()).map_err(TaskRepositoryError::persistence)?;
    let tags = serde_json::to_value(task.tags()).map_err(TaskRepositoryError::persistence)?;
    let reference_links =
        serde_json::to_value(task.reference_links()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        board_id: task.board_id().into_inner(),
        column_id: task.column_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        tags,
        position,
        due_date: task.due_date(),
        reference_links,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(crate) fn row_to_comment(row: CommentRow) -> Comment {
    Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author: UserId::from_uuid(row.author),
        body: row.body,
        created_at: row.created_at,
    })
}

pub(crate) fn comment_to_new_row(comment: &Comment) -> NewCommentRow {
    NewCommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        author: comment.author().into_inner(),
        body: comment.body().to_owned(),
        created_at: comment.created_at(),
    }
}

pub(crate) fn row_to_attachment(row: AttachmentRow) -> TaskRepositoryResult<Attachment> {
    let size_bytes = u64::try_from(row.size_bytes).map_err(TaskRepositoryError::persistence)?;

    Ok(Attachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        file_name: row.file_name,
        size_bytes,
        mime_type: row.mime_type,
        uploaded_by: UserId::from_uuid(row.uploaded_by),
        storage_pointer: row.storage_pointer,
        created_at: row.created_at,
    }))
}

pub(crate) fn attachment_to_new_row(
    attachment: &Attachment,
) -> TaskRepositoryResult<NewAttachmentRow> {
    let size_bytes =
        i64::try_from(attachment.size_bytes()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewAttachmentRow {
        id: attachment.id().into_inner(),
        task_id: attachment.task_id().into_inner(),
        file_name: attachment.file_name().to_owned(),
        size_bytes,
        mime_type: attachment.mime_type().to_owned(),
        uploaded_by: attachment.uploaded_by().into_inner(),
        storage_pointer: attachment.storage_pointer().to_owned(),
        created_at: attachment.created_at(),
    })
}
