//! `PostgreSQL` adapters for the board context.

mod conversion;
mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresBoardStore};

#[cfg(test)]
pub(crate) use conversion::{
    attachment_to_new_row, board_to_new_row, column_to_new_row, comment_to_new_row,
    row_to_attachment, row_to_board, row_to_column, row_to_comment, row_to_task, task_to_new_row,
};
#[cfg(test)]
pub(crate) use models::{AttachmentRow, BoardRow, ColumnRow, CommentRow, TaskRow};
