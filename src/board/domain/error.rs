//! Error types for board-domain validation and parsing.

use super::ids::{BoardId, ColumnId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board-domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board name is empty after trimming.
    #[error("board name must not be empty")]
    EmptyBoardName,

    /// The column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The comment body is empty after trimming.
    #[error("comment body must not be empty")]
    EmptyCommentBody,

    /// The attachment file name is empty after trimming.
    #[error("attachment file name must not be empty")]
    EmptyAttachmentName,

    /// The board is bound to an organisational area and cannot be deleted
    /// by ordinary operators.
    #[error("board {0} is area-bound and cannot be deleted")]
    ProtectedBoard(BoardId),

    /// The task does not belong to the board being operated on.
    #[error("task {0} is not on this board")]
    TaskNotOnBoard(TaskId),

    /// The column does not belong to the board being operated on.
    #[error("column {0} is not on this board")]
    ColumnNotOnBoard(ColumnId),

    /// The task carries no approval window to resolve.
    #[error("task {0} has no open approval window")]
    NoApprovalWindow(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing approval statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown approval status: {0}")]
pub struct ParseApprovalStatusError(pub String);
