//! Ordering engine: two-phase task moves with dense renumbering.
//!
//! A move is first proposed against an in-memory view, which renumbers the
//! touched columns and resolves the status and approval consequences.
//! Committing writes the proposal atomically; when storage rejects it the
//! caller gets the canonical view back so the client can reconcile.

use crate::board::{
    domain::{BoardDomainError, BoardId, BoardView, ColumnId, MoveOutcome, Task, TaskId, UserId},
    ports::{
        BoardRepository, BoardRepositoryError, TaskMoveWrite, TaskRepository, TaskRepositoryError,
    },
};
use crate::history::{
    domain::HistoryAction,
    ports::HistoryRepository,
    services::{HistoryRecorder, RecordEntryRequest},
};
use crate::notification::{
    domain::NotificationKind,
    ports::NotificationRepository,
    services::{NotificationDispatcher, NotifyRequest},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised when committing a move.
#[derive(Debug, Clone, Error)]
pub enum MoveCommitError {
    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The task or column is unknown to the board.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Loading the board failed.
    #[error(transparent)]
    BoardStore(#[from] BoardRepositoryError),

    /// Loading the tasks failed.
    #[error(transparent)]
    TaskStore(#[from] TaskRepositoryError),

    /// Storage rejected the committed write. When the canonical view could
    /// be reloaded it is attached so the client can resynchronise.
    #[error("move rejected by storage: {source}")]
    Rejected {
        /// The storage failure that rejected the write.
        source: TaskRepositoryError,
        /// The board as storage currently has it, when reloadable.
        canonical: Option<Box<BoardView>>,
    },
}

/// Request to move a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTaskRequest {
    /// Board the task lives on.
    pub board_id: BoardId,
    /// Task to move.
    pub task_id: TaskId,
    /// Column the task should land in.
    pub target_column: ColumnId,
    /// Requested index within the target column; clamped to the valid
    /// range.
    pub target_index: usize,
    /// User performing the move.
    pub actor: UserId,
}

/// A committed move: the post-move view plus what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedMove {
    /// The board view after the move.
    pub view: BoardView,
    /// What the move changed; [`MoveOutcome::NoOp`] when nothing did.
    pub outcome: MoveOutcome,
}

/// Proposes a move against a view without committing anything.
///
/// The input view is not modified; the returned outcome describes what a
/// commit would write.
///
/// # Errors
///
/// Returns [`BoardDomainError::TaskNotOnBoard`] or
/// [`BoardDomainError::ColumnNotOnBoard`] when either side of the move is
/// unknown to the view.
pub fn propose_move(
    view: &BoardView,
    task_id: TaskId,
    target_column: ColumnId,
    requested_index: usize,
    clock: &impl Clock,
) -> Result<MoveOutcome, BoardDomainError> {
    let mut working = view.clone();
    working.apply_move(task_id, target_column, requested_index, clock)
}

/// Application service committing task moves.
#[derive(Debug)]
pub struct OrderingEngine<S, H, N, C> {
    store: Arc<S>,
    history: HistoryRecorder<H, C>,
    notifier: NotificationDispatcher<N, C>,
    clock: Arc<C>,
}

impl<S, H, N, C> Clone for OrderingEngine<S, H, N, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            history: self.history.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, H, N, C> OrderingEngine<S, H, N, C>
where
    S: BoardRepository + TaskRepository,
    H: HistoryRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates an engine over the given store and side-effect services.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        history: HistoryRecorder<H, C>,
        notifier: NotificationDispatcher<N, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            history,
            notifier,
            clock,
        }
    }

    /// Moves a task and commits the renumbered result atomically.
    ///
    /// A same-column, same-index move is a no-op: nothing is written, no
    /// history is recorded, and nobody is notified. A real move records a
    /// history entry and notifies the task's assignee (unless the assignee
    /// made the move themselves); both side effects are best-effort and
    /// never fail the move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveCommitError::BoardNotFound`] when the board does not
    /// exist, [`MoveCommitError::Domain`] when the task or target column is
    /// unknown to it, and [`MoveCommitError::Rejected`] when storage refuses
    /// the write.
    pub async fn commit_move(
        &self,
        request: MoveTaskRequest,
    ) -> Result<CommittedMove, MoveCommitError> {
        let mut view = self.load_view(request.board_id).await?;
        let source_column = view
            .find_task(request.task_id)
            .map(Task::column_id)
            .ok_or(BoardDomainError::TaskNotOnBoard(request.task_id))?;

        let outcome = view.apply_move(
            request.task_id,
            request.target_column,
            request.target_index,
            self.clock.as_ref(),
        )?;

        let details = match &outcome {
            MoveOutcome::NoOp => {
                return Ok(CommittedMove { view, outcome });
            }
            MoveOutcome::Moved(details) => details.clone(),
        };

        let write = TaskMoveWrite {
            task: details.task.clone(),
            repositions: details.repositions.clone(),
        };
        if let Err(source) = self.store.apply_move(&write).await {
            let canonical = self.load_view(request.board_id).await.ok().map(Box::new);
            return Err(MoveCommitError::Rejected { source, canonical });
        }

        let source_name = column_name(&view, source_column);
        let target_name = column_name(&view, request.target_column);
        self.history
            .record_best_effort(
                RecordEntryRequest::new(request.task_id, request.actor, HistoryAction::Moved)
                    .with_field("column")
                    .with_change(source_name, target_name.clone()),
            )
            .await;

        if let Some(assignee) = details.task.assigned_to()
            && assignee != request.actor
        {
            let mut notify = NotifyRequest::new(
                assignee,
                request.actor,
                NotificationKind::Move,
                format!("Task moved: {}", details.task.title()),
            )
            .with_task(request.task_id)
            .with_board(request.board_id);
            if let Some(name) = target_name {
                notify = notify.with_body(format!("Moved to {name}"));
            }
            self.notifier.notify_best_effort(notify).await;
        }

        Ok(CommittedMove { view, outcome })
    }

    /// Loads the ordered view of a board.
    ///
    /// # Errors
    ///
    /// Returns [`MoveCommitError::BoardNotFound`] when the board does not
    /// exist.
    pub async fn load_view(&self, board: BoardId) -> Result<BoardView, MoveCommitError> {
        self.store
            .find_board(board)
            .await?
            .ok_or(MoveCommitError::BoardNotFound(board))?;
        let columns = self.store.columns_of_board(board).await?;
        let tasks = self.store.tasks_of_board(board).await?;
        Ok(BoardView::assemble(board, columns, tasks))
    }
}

/// Looks up a column's display name on a view.
fn column_name(view: &BoardView, column: ColumnId) -> Option<String> {
    view.column(column)
        .map(|view| view.column().name().to_owned())
}
