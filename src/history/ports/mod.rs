//! Ports exposed by the history context.

mod repository;

pub use repository::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult};
