//! In-memory board store for tests and database-less embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Attachment, Board, BoardId, Column, ColumnId, Comment, Task, TaskId},
    ports::{
        BoardRepository, BoardRepositoryError, BoardRepositoryResult, TaskMoveWrite,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory implementation of both board-context ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Board>,
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
    comments: HashMap<TaskId, Vec<Comment>>,
    attachments: HashMap<TaskId, Vec<Attachment>>,
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Converts a poisoned-lock error into an I/O error for wrapping.
fn poisoned(err: impl ToString) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Removes a task and everything it owns from the state.
fn purge_task(state: &mut InMemoryBoardState, task_id: TaskId) {
    state.tasks.remove(&task_id);
    state.comments.remove(&task_id);
    state.attachments.remove(&task_id);
}

/// Removes a column and every task it owns from the state.
fn purge_column(state: &mut InMemoryBoardState, column_id: ColumnId) {
    state.columns.remove(&column_id);
    let owned: Vec<TaskId> = state
        .tasks
        .values()
        .filter(|task| task.column_id() == column_id)
        .map(Task::id)
        .collect();
    for task_id in owned {
        purge_task(state, task_id);
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardStore {
    async fn create_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardRepositoryError::DuplicateBoard(board.id()));
        }
        state.boards.insert(board.id(), board.clone());
        Ok(())
    }

    async fn boards(&self, area_key: Option<&str>) -> BoardRepositoryResult<Vec<Board>> {
        let state = self
            .state
            .read()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        let mut boards: Vec<Board> = state
            .boards
            .values()
            .filter(|board| area_key.is_none_or(|area| board.area_key() == Some(area)))
            .cloned()
            .collect();
        boards.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(boards)
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        let state = self
            .state
            .read()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        Ok(state.boards.get(&id).cloned())
    }

    async fn delete_board(&self, id: BoardId) -> BoardRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        if state.boards.remove(&id).is_none() {
            return Err(BoardRepositoryError::BoardNotFound(id));
        }
        let owned: Vec<ColumnId> = state
            .columns
            .values()
            .filter(|column| column.board_id() == id)
            .map(Column::id)
            .collect();
        for column_id in owned {
            purge_column(&mut state, column_id);
        }
        Ok(())
    }

    async fn create_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        if state.columns.contains_key(&column.id()) {
            return Err(BoardRepositoryError::DuplicateColumn(column.id()));
        }
        if !state.boards.contains_key(&column.board_id()) {
            return Err(BoardRepositoryError::BoardNotFound(column.board_id()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn columns_of_board(&self, board: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        let state = self
            .state
            .read()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        let mut columns: Vec<Column> = state
            .columns
            .values()
            .filter(|column| column.board_id() == board)
            .cloned()
            .collect();
        columns.sort_by_key(Column::position);
        Ok(columns)
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        let state = self
            .state
            .read()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        Ok(state.columns.get(&id).cloned())
    }

    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        if !state.columns.contains_key(&column.id()) {
            return Err(BoardRepositoryError::ColumnNotFound(column.id()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardRepositoryError::persistence(poisoned(err)))?;
        if !state.columns.contains_key(&id) {
            return Err(BoardRepositoryError::ColumnNotFound(id));
        }
        purge_column(&mut state, id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardStore {
    async fn create_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if !state.columns.contains_key(&task.column_id()) {
            return Err(TaskRepositoryError::ColumnNotFound(task.column_id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        if !state.tasks.contains_key(&id) {
            return Err(TaskRepositoryError::TaskNotFound(id));
        }
        purge_task(&mut state, id);
        Ok(())
    }

    async fn tasks_of_board(&self, board: BoardId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.board_id() == board)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.column_id(), task.position()));
        Ok(tasks)
    }

    async fn tasks_of_column(&self, column: ColumnId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.column_id() == column)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::position);
        Ok(tasks)
    }

    async fn apply_move(&self, write: &TaskMoveWrite) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        if !state.tasks.contains_key(&write.task.id()) {
            return Err(TaskRepositoryError::TaskNotFound(write.task.id()));
        }
        if !state.columns.contains_key(&write.task.column_id()) {
            return Err(TaskRepositoryError::ColumnNotFound(write.task.column_id()));
        }

        state.tasks.insert(write.task.id(), write.task.clone());
        // Concurrent movers race on positions; a neighbour deleted since the
        // view was loaded is skipped rather than failing the whole write.
        for reposition in &write.repositions {
            if let Some(task) = state.tasks.get_mut(&reposition.task_id) {
                task.set_position(reposition.position);
            }
        }
        Ok(())
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TaskRepositoryError::TaskNotFound(comment.task_id()));
        }
        state
            .comments
            .entry(comment.task_id())
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn comments_of_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        Ok(state.comments.get(&task).cloned().unwrap_or_default())
    }

    async fn add_attachment(&self, attachment: &Attachment) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        if !state.tasks.contains_key(&attachment.task_id()) {
            return Err(TaskRepositoryError::TaskNotFound(attachment.task_id()));
        }
        state
            .attachments
            .entry(attachment.task_id())
            .or_default()
            .push(attachment.clone());
        Ok(())
    }

    async fn attachments_of_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Attachment>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::persistence(poisoned(err)))?;
        Ok(state.attachments.get(&task).cloned().unwrap_or_default())
    }
}
