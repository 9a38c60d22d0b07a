//! `PostgreSQL` store implementation for board-context persistence.

use super::conversion::{
    attachment_to_new_row, board_to_new_row, column_to_new_row, comment_to_new_row,
    row_to_attachment, row_to_board, row_to_column, row_to_comment, row_to_task, task_to_new_row,
};
use super::models::{AttachmentRow, BoardRow, ColumnRow, CommentRow, TaskRow};
use super::schema::{attachments, boards, columns, comments, tasks};
use crate::board::{
    domain::{Attachment, Board, BoardId, Column, ColumnId, Comment, Task, TaskId},
    ports::{
        BoardRepository, BoardRepositoryError, BoardRepositoryResult, TaskMoveWrite,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board-context adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed implementation of both board-context ports.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_board<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }

    async fn run_task<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardStore {
    async fn create_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let new_row = board_to_new_row(board);

        self.run_board(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn boards(&self, area_key: Option<&str>) -> BoardRepositoryResult<Vec<Board>> {
        let area_filter = area_key.map(str::to_owned);

        self.run_board(move |connection| {
            let mut query = boards::table
                .select(BoardRow::as_select())
                .order(boards::name.asc())
                .into_boxed();
            if let Some(area) = area_filter {
                query = query.filter(boards::area_key.eq(area));
            }

            let rows = query
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_board).collect())
        })
        .await
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_board(move |connection| {
            let row = boards::table
                .find(id.into_inner())
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_board))
        })
        .await
    }

    async fn delete_board(&self, id: BoardId) -> BoardRepositoryResult<()> {
        self.run_board(move |connection| {
            let deleted = connection
                .transaction::<usize, DieselError, _>(|tx_conn| {
                    let board_tasks = || {
                        tasks::table
                            .filter(tasks::board_id.eq(id.into_inner()))
                            .select(tasks::id)
                    };
                    diesel::delete(
                        comments::table.filter(comments::task_id.eq_any(board_tasks())),
                    )
                    .execute(tx_conn)?;
                    diesel::delete(
                        attachments::table.filter(attachments::task_id.eq_any(board_tasks())),
                    )
                    .execute(tx_conn)?;
                    diesel::delete(tasks::table.filter(tasks::board_id.eq(id.into_inner())))
                        .execute(tx_conn)?;
                    diesel::delete(columns::table.filter(columns::board_id.eq(id.into_inner())))
                        .execute(tx_conn)?;
                    diesel::delete(boards::table.find(id.into_inner())).execute(tx_conn)
                })
                .map_err(BoardRepositoryError::persistence)?;

            if deleted == 0 {
                return Err(BoardRepositoryError::BoardNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn create_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id();
        let board_id = column.board_id();
        let new_row = column_to_new_row(column)?;

        self.run_board(move |connection| {
            diesel::insert_into(columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateColumn(column_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        BoardRepositoryError::BoardNotFound(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn columns_of_board(&self, board: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        self.run_board(move |connection| {
            let rows = columns::table
                .filter(columns::board_id.eq(board.into_inner()))
                .order(columns::position.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_board(move |connection| {
            let row = columns::table
                .find(id.into_inner())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id();
        let changeset = column_to_new_row(column)?;

        self.run_board(move |connection| {
            let updated = diesel::update(columns::table.find(column_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(BoardRepositoryError::ColumnNotFound(column_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<()> {
        self.run_board(move |connection| {
            let deleted = connection
                .transaction::<usize, DieselError, _>(|tx_conn| {
                    let column_tasks = || {
                        tasks::table
                            .filter(tasks::column_id.eq(id.into_inner()))
                            .select(tasks::id)
                    };
                    diesel::delete(
                        comments::table.filter(comments::task_id.eq_any(column_tasks())),
                    )
                    .execute(tx_conn)?;
                    diesel::delete(
                        attachments::table.filter(attachments::task_id.eq_any(column_tasks())),
                    )
                    .execute(tx_conn)?;
                    diesel::delete(tasks::table.filter(tasks::column_id.eq(id.into_inner())))
                        .execute(tx_conn)?;
                    diesel::delete(columns::table.find(id.into_inner())).execute(tx_conn)
                })
                .map_err(BoardRepositoryError::persistence)?;

            if deleted == 0 {
                return Err(BoardRepositoryError::ColumnNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardStore {
    async fn create_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let column_id = task.column_id();
        let new_row = task_to_new_row(task)?;

        self.run_task(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ColumnNotFound(column_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_task(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = task_to_new_row(task)?;

        self.run_task(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_task(move |connection| {
            let deleted = connection
                .transaction::<usize, DieselError, _>(|tx_conn| {
                    diesel::delete(comments::table.filter(comments::task_id.eq(id.into_inner())))
                        .execute(tx_conn)?;
                    diesel::delete(
                        attachments::table.filter(attachments::task_id.eq(id.into_inner())),
                    )
                    .execute(tx_conn)?;
                    diesel::delete(tasks::table.find(id.into_inner())).execute(tx_conn)
                })
                .map_err(TaskRepositoryError::persistence)?;

            if deleted == 0 {
                return Err(TaskRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn tasks_of_board(&self, board: BoardId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_task(move |connection| {
            let rows = tasks::table
                .filter(tasks::board_id.eq(board.into_inner()))
                .order((tasks::column_id.asc(), tasks::position.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn tasks_of_column(&self, column: ColumnId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_task(move |connection| {
            let rows = tasks::table
                .filter(tasks::column_id.eq(column.into_inner()))
                .order(tasks::position.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn apply_move(&self, write: &TaskMoveWrite) -> TaskRepositoryResult<()> {
        let task_id = write.task.id();
        let changeset = task_to_new_row(&write.task)?;
        let repositions: Vec<(uuid::Uuid, i32)> = write
            .repositions
            .iter()
            .map(|reposition| {
                i32::try_from(reposition.position)
                    .map(|position| (reposition.task_id.into_inner(), position))
                    .map_err(TaskRepositoryError::persistence)
            })
            .collect::<TaskRepositoryResult<_>>()?;

        self.run_task(move |connection| {
            connection
                .transaction::<(), TaskRepositoryError, _>(|tx_conn| {
                    let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                        .set(&changeset)
                        .execute(tx_conn)
                        .map_err(TaskRepositoryError::persistence)?;
                    if updated == 0 {
                        return Err(TaskRepositoryError::TaskNotFound(task_id));
                    }

                    for (id, position) in repositions {
                        diesel::update(tasks::table.find(id))
                            .set(tasks::position.eq(position))
                            .execute(tx_conn)
                            .map_err(TaskRepositoryError::persistence)?;
                    }
                    Ok(())
                })
        })
        .await
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let task_id = comment.task_id();
        let new_row = comment_to_new_row(comment);

        self.run_task(move |connection| {
            diesel::insert_into(comments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::TaskNotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn comments_of_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        self.run_task(move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_comment).collect())
        })
        .await
    }

    async fn add_attachment(&self, attachment: &Attachment) -> TaskRepositoryResult<()> {
        let task_id = attachment.task_id();
        let new_row = attachment_to_new_row(attachment)?;

        self.run_task(move |connection| {
            diesel::insert_into(attachments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::TaskNotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn attachments_of_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Attachment>> {
        self.run_task(move |connection| {
            let rows = attachments::table
                .filter(attachments::task_id.eq(task.into_inner()))
                .order(attachments::created_at.asc())
                .select(AttachmentRow::as_select())
                .load::<AttachmentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_attachment).collect()
        })
        .await
    }
}
