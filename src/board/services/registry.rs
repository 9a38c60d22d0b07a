//! Board registry: board and column lifecycle plus view assembly.

use crate::board::{
    domain::{Board, BoardDomainError, BoardId, BoardView, Column, ColumnId},
    ports::{BoardRepository, BoardRepositoryError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the board registry.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The board store failed.
    #[error(transparent)]
    BoardStore(#[from] BoardRepositoryError),

    /// The task store failed.
    #[error(transparent)]
    TaskStore(#[from] TaskRepositoryError),
}

/// Request to create a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardRequest {
    name: String,
    description: Option<String>,
    area_key: Option<String>,
}

impl CreateBoardRequest {
    /// Creates a request for a board with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            area_key: None,
        }
    }

    /// Sets the board description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Binds the board to an organisational area, protecting it from
    /// operator deletion.
    #[must_use]
    pub fn with_area_key(mut self, area_key: impl Into<String>) -> Self {
        self.area_key = Some(area_key.into());
        self
    }
}

/// Request to create a column on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumnRequest {
    board_id: BoardId,
    name: String,
    color: String,
    stage_key: Option<String>,
    sla_hours: Option<u32>,
    wip_limit: Option<u32>,
}

impl CreateColumnRequest {
    /// Creates a request for a column with the given name and colour.
    #[must_use]
    pub fn new(board_id: BoardId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            board_id,
            name: name.into(),
            color: color.into(),
            stage_key: None,
            sla_hours: None,
            wip_limit: None,
        }
    }

    /// Declares the canonical stage key.
    #[must_use]
    pub fn with_stage_key(mut self, stage_key: impl Into<String>) -> Self {
        self.stage_key = Some(stage_key.into());
        self
    }

    /// Configures the approval SLA window in hours.
    #[must_use]
    pub const fn with_sla_hours(mut self, sla_hours: u32) -> Self {
        self.sla_hours = Some(sla_hours);
        self
    }

    /// Configures the work-in-progress limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, wip_limit: u32) -> Self {
        self.wip_limit = Some(wip_limit);
        self
    }
}

/// Application service for board and column lifecycle.
#[derive(Debug)]
pub struct BoardRegistry<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for BoardRegistry<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> BoardRegistry<S, C>
where
    S: BoardRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a registry over the given store and clock.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a board.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Domain`] when the name is empty and
    /// [`RegistryError::BoardStore`] when the write fails.
    pub async fn create_board(&self, request: CreateBoardRequest) -> Result<Board, RegistryError> {
        let mut board = Board::new(request.name, self.clock.as_ref())?;
        if let Some(description) = request.description {
            board = board.with_description(description);
        }
        if let Some(area_key) = request.area_key {
            board = board.with_area_key(area_key);
        }

        self.store.create_board(&board).await?;
        Ok(board)
    }

    /// Returns all boards, or only boards bound to the given area.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardStore`] when the read fails.
    pub async fn boards_for(&self, area_key: Option<&str>) -> Result<Vec<Board>, RegistryError> {
        Ok(self.store.boards(area_key).await?)
    }

    /// Returns one board.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] when the board does not
    /// exist.
    pub async fn board(&self, id: BoardId) -> Result<Board, RegistryError> {
        self.store
            .find_board(id)
            .await?
            .ok_or(RegistryError::BoardNotFound(id))
    }

    /// Deletes a board, cascading to its columns and tasks.
    ///
    /// Boards bound to an organisational area are protected and refuse
    /// deletion.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] when the board does not
    /// exist and [`RegistryError::Domain`] when it is protected.
    pub async fn delete_board(&self, id: BoardId) -> Result<(), RegistryError> {
        let board = self.board(id).await?;
        board.ensure_deletable()?;
        Ok(self.store.delete_board(id).await?)
    }

    /// Creates a column at the end of a board's lane order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] when the board does not
    /// exist and [`RegistryError::Domain`] when the name is empty.
    pub async fn create_column(
        &self,
        request: CreateColumnRequest,
    ) -> Result<Column, RegistryError> {
        let board = self.board(request.board_id).await?;
        let siblings = self.store.columns_of_board(board.id()).await?;
        let position = u32::try_from(siblings.len()).unwrap_or(u32::MAX);

        let mut column = Column::new(board.id(), request.name, request.color, position)?;
        if let Some(stage_key) = request.stage_key {
            column = column.with_stage_key(stage_key);
        }
        if let Some(sla_hours) = request.sla_hours {
            column = column.with_sla_hours(sla_hours);
        }
        if let Some(wip_limit) = request.wip_limit {
            column = column.with_wip_limit(wip_limit);
        }

        self.store.create_column(&column).await?;
        Ok(column)
    }

    /// Returns the columns of a board in lane order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] when the board does not
    /// exist.
    pub async fn columns_of(&self, board: BoardId) -> Result<Vec<Column>, RegistryError> {
        self.board(board).await?;
        Ok(self.store.columns_of_board(board).await?)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ColumnNotFound`] when the column does not
    /// exist and [`RegistryError::Domain`] when the new name is empty.
    pub async fn rename_column(
        &self,
        id: ColumnId,
        name: impl Into<String> + Send,
    ) -> Result<Column, RegistryError> {
        let mut column = self
            .store
            .find_column(id)
            .await?
            .ok_or(RegistryError::ColumnNotFound(id))?;
        column.rename(name)?;
        self.store.update_column(&column).await?;
        Ok(column)
    }

    /// Deletes a column, cascading to every task it owns.
    ///
    /// Surviving columns are renumbered so the board's lane order stays
    /// dense.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ColumnNotFound`] when the column does not
    /// exist.
    pub async fn delete_column(&self, id: ColumnId) -> Result<(), RegistryError> {
        let column = self
            .store
            .find_column(id)
            .await?
            .ok_or(RegistryError::ColumnNotFound(id))?;
        self.store.delete_column(id).await?;
        self.renumber_columns(column.board_id()).await
    }

    /// Closes the lane-order gap left behind by a removed column.
    async fn renumber_columns(&self, board: BoardId) -> Result<(), RegistryError> {
        let survivors = self.store.columns_of_board(board).await?;
        for (index, mut survivor) in survivors.into_iter().enumerate() {
            let position = u32::try_from(index).unwrap_or(u32::MAX);
            if survivor.position() != position {
                survivor.set_position(position);
                self.store.update_column(&survivor).await?;
            }
        }
        Ok(())
    }

    /// Assembles the ordered view of a board.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BoardNotFound`] when the board does not
    /// exist.
    pub async fn board_view(&self, board: BoardId) -> Result<BoardView, RegistryError> {
        self.board(board).await?;
        let columns = self.store.columns_of_board(board).await?;
        let tasks = self.store.tasks_of_board(board).await?;
        Ok(BoardView::assemble(board, columns, tasks))
    }
}
