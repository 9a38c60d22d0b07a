//! Repository ports for board, column, and task persistence.

use crate::board::domain::{
    Attachment, Board, BoardId, Column, ColumnId, Comment, Task, TaskId, TaskReposition,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Atomic write for a committed task move.
///
/// The moved task's column, position, status, timestamp, and reference
/// links are written together with every shifted neighbour's new position
/// in one transaction; partial application must never be observable.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskMoveWrite {
    /// The moved task, already relocated and stamped.
    pub task: Task,
    /// New dense positions for every other task in the touched column(s).
    pub repositions: Vec<TaskReposition>,
}

/// Board and column persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board (setup/seed path).
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateBoard`] when the board
    /// identifier already exists.
    async fn create_board(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Returns all boards, or only boards bound to the given area.
    async fn boards(&self, area_key: Option<&str>) -> BoardRepositoryResult<Vec<Board>>;

    /// Finds a board by identifier. Returns `None` when absent.
    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Deletes a board, cascading to its columns and their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the board does
    /// not exist; a partially failed cascade is surfaced as
    /// [`BoardRepositoryError::Persistence`].
    async fn delete_board(&self, id: BoardId) -> BoardRepositoryResult<()>;

    /// Stores a new column (setup/seed path).
    async fn create_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Returns the columns of a board ordered by position.
    async fn columns_of_board(&self, board: BoardId) -> BoardRepositoryResult<Vec<Column>>;

    /// Finds a column by identifier. Returns `None` when absent.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Persists changes to an existing column (rename, policy edits).
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Deletes a column, cascading to every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist; a partially failed cascade is surfaced as
    /// [`BoardRepositoryError::Persistence`].
    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<()>;
}

/// Task persistence contract, including the atomic move write.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task
    /// identifier already exists.
    async fn create_task(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_task(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Persists changes to an existing task (title, priority, tags,
    /// assignee, due date, approval resolution).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task, cascading to its comments and attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns every task on a board, ordered by position within each
    /// column.
    async fn tasks_of_board(&self, board: BoardId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks of one column ordered by position.
    async fn tasks_of_column(&self, column: ColumnId) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies a committed move atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the moved task has
    /// vanished; any partial failure rolls the whole write back and is
    /// surfaced as [`TaskRepositoryError::Persistence`].
    async fn apply_move(&self, write: &TaskMoveWrite) -> TaskRepositoryResult<()>;

    /// Appends a comment to a task.
    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()>;

    /// Returns the comments of a task in creation order.
    async fn comments_of_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>>;

    /// Registers attachment metadata for a task.
    async fn add_attachment(&self, attachment: &Attachment) -> TaskRepositoryResult<()>;

    /// Returns the attachment metadata of a task in upload order.
    async fn attachments_of_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Attachment>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The column the write targets was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
