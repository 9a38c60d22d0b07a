//! Domain model for the board context.
//!
//! Boards own ordered columns, columns own ordered tasks, and all ordering,
//! stage resolution, and approval stamping live here with no infrastructure
//! dependencies. Timestamps come from an injected clock so behaviour is
//! deterministic under test.

mod approval;
mod attachment;
mod board;
mod column;
mod comment;
mod error;
mod ids;
mod links;
mod stage;
mod task;
mod view;

pub use approval::{ApprovalState, ApprovalStatus, DEFAULT_SLA_HOURS};
pub use attachment::{Attachment, PersistedAttachmentData};
pub use board::{Board, PersistedBoardData};
pub use column::{Column, PersistedColumnData};
pub use comment::{Comment, PersistedCommentData};
pub use error::{
    BoardDomainError, ParseApprovalStatusError, ParsePriorityError, ParseTaskStatusError,
};
pub use ids::{AttachmentId, BoardId, ColumnId, CommentId, TaskId, UserId};
pub use links::ReferenceLinks;
pub use stage::{enters_approval, is_approval_stage, resolve_status};
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus};
pub use view::{BoardView, ColumnView, MoveDetails, MoveOutcome, TaskReposition};

pub(crate) use ids::uuid_id;
