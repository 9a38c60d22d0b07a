//! Application services for the board context.

mod ordering;
mod registry;
mod tasks;

pub use ordering::{
    CommittedMove, MoveCommitError, MoveTaskRequest, OrderingEngine, propose_move,
};
pub use registry::{BoardRegistry, CreateBoardRequest, CreateColumnRequest, RegistryError};
pub use tasks::{
    AddAttachmentRequest, AddCommentRequest, CreateTaskRequest, TaskService, TaskServiceError,
    UpdateTaskRequest,
};
