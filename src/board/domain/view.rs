//! In-memory board view: the ordered working copy a client reorders
//! optimistically and the ordering engine renumbers authoritatively.

use super::{
    BoardDomainError, BoardId, Column, ColumnId, Task, TaskId, enters_approval, resolve_status,
};
use mockable::Clock;
use serde::Serialize;

/// One column together with its tasks in dense position order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    column: Column,
    tasks: Vec<Task>,
}

impl ColumnView {
    /// Returns the column.
    #[must_use]
    pub const fn column(&self) -> &Column {
        &self.column
    }

    /// Returns the tasks in position order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// New dense rank for one task shifted by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskReposition {
    /// The shifted task.
    pub task_id: TaskId,
    /// Its new dense position within its column.
    pub position: u32,
}

/// What a move changed, used to build the authoritative write and its
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveDetails {
    /// The moved task after relocation (column, position, status, and any
    /// approval stamp applied).
    pub task: Task,
    /// Column the task left.
    pub source_column: ColumnId,
    /// Column the task entered.
    pub target_column: ColumnId,
    /// Whether this move entered an approval stage from a non-approval one.
    pub entered_approval: bool,
    /// New positions for every other task in the touched column(s).
    pub repositions: Vec<TaskReposition>,
}

/// Outcome of applying a move to a view.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Same column, same index: nothing changed and nothing must be written.
    NoOp,
    /// The task moved and the touched column(s) were renumbered.
    Moved(MoveDetails),
}

/// Ordered snapshot of a board: columns by position, tasks by position
/// within each column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    board_id: BoardId,
    columns: Vec<ColumnView>,
}

impl BoardView {
    /// Assembles a view from unordered column and task rows.
    ///
    /// Tasks referencing a column that is not part of the board are dropped;
    /// they are unreachable through any lane and must not shadow-order.
    #[must_use]
    pub fn assemble(board_id: BoardId, mut columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        columns.sort_by_key(Column::position);
        let mut views: Vec<ColumnView> = columns
            .into_iter()
            .map(|column| ColumnView {
                column,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            if let Some(view) = views
                .iter_mut()
                .find(|view| view.column.id() == task.column_id())
            {
                view.tasks.push(task);
            }
        }
        for view in &mut views {
            view.tasks.sort_by_key(Task::position);
        }

        Self { board_id, columns: views }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the columns in position order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnView] {
        &self.columns
    }

    /// Returns the view of one column, if present.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&ColumnView> {
        self.columns
            .iter()
            .find(|view| view.column.id() == column_id)
    }

    /// Returns a task anywhere on the board, if present.
    #[must_use]
    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .find_map(|view| view.tasks.iter().find(|task| task.id() == task_id))
    }

    /// Relocates a task into a column at the requested index and renumbers
    /// the touched column(s) densely.
    ///
    /// The index is clamped to the valid range of the target column. Moving
    /// a task onto its current column and index is detected before any
    /// mutation and reported as [`MoveOutcome::NoOp`]. The moved task's
    /// status is resolved from the destination column, and the approval
    /// window is armed when the move enters an approval stage from a
    /// non-approval one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotOnBoard`] or
    /// [`BoardDomainError::ColumnNotOnBoard`] when either side of the move
    /// is unknown to this board.
    pub fn apply_move(
        &mut self,
        task_id: TaskId,
        target_column: ColumnId,
        requested_index: usize,
        clock: &impl Clock,
    ) -> Result<MoveOutcome, BoardDomainError> {
        let (source_idx, task_idx) = self
            .locate(task_id)
            .ok_or(BoardDomainError::TaskNotOnBoard(task_id))?;
        let target_idx = self
            .columns
            .iter()
            .position(|view| view.column.id() == target_column)
            .ok_or(BoardDomainError::ColumnNotOnBoard(target_column))?;

        let source = self
            .columns
            .get(source_idx)
            .ok_or(BoardDomainError::TaskNotOnBoard(task_id))?;
        if source_idx == target_idx {
            let last_index = source.tasks.len().saturating_sub(1);
            if requested_index.min(last_index) == task_idx {
                return Ok(MoveOutcome::NoOp);
            }
        }

        let source_column = source.column.clone();
        let destination = self
            .columns
            .get(target_idx)
            .map(|view| view.column.clone())
            .ok_or(BoardDomainError::ColumnNotOnBoard(target_column))?;
        let status = resolve_status(&destination);
        let entered_approval = enters_approval(&source_column, &destination);

        let mut task = self
            .columns
            .get_mut(source_idx)
            .ok_or(BoardDomainError::TaskNotOnBoard(task_id))?
            .tasks
            .remove(task_idx);

        let target_view = self
            .columns
            .get_mut(target_idx)
            .ok_or(BoardDomainError::ColumnNotOnBoard(target_column))?;
        let insert_at = requested_index.min(target_view.tasks.len());

        task.relocate(target_column, dense_position(insert_at), status, clock);
        if entered_approval {
            task.enter_approval(destination.sla_hours(), clock);
        }
        target_view.tasks.insert(insert_at, task);

        let mut repositions = Vec::new();
        self.renumber_column(target_idx, task_id, &mut repositions);
        if source_idx != target_idx {
            self.renumber_column(source_idx, task_id, &mut repositions);
        }

        let moved = self
            .find_task(task_id)
            .cloned()
            .ok_or(BoardDomainError::TaskNotOnBoard(task_id))?;

        Ok(MoveOutcome::Moved(MoveDetails {
            task: moved,
            source_column: source_column.id(),
            target_column,
            entered_approval,
            repositions,
        }))
    }

    /// Re-assigns dense positions across one column, collecting the new rank
    /// of every task except the one being moved.
    fn renumber_column(
        &mut self,
        column_idx: usize,
        moved_task: TaskId,
        repositions: &mut Vec<TaskReposition>,
    ) {
        if let Some(view) = self.columns.get_mut(column_idx) {
            for (index, task) in view.tasks.iter_mut().enumerate() {
                let position = dense_position(index);
                task.set_position(position);
                if task.id() != moved_task {
                    repositions.push(TaskReposition {
                        task_id: task.id(),
                        position,
                    });
                }
            }
        }
    }

    /// Finds the column index and in-column index of a task.
    fn locate(&self, task_id: TaskId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(column_idx, view)| {
            view.tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|task_idx| (column_idx, task_idx))
        })
    }
}

/// Converts an array index into a dense position value.
///
/// Columns are bounded far below `u32::MAX`; saturation keeps the
/// conversion total without an error path.
fn dense_position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
