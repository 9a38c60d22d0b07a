//! Repository port for the append-only history trail.

use crate::board::domain::TaskId;
use crate::history::domain::HistoryEntry;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history repository operations.
pub type HistoryRepositoryResult<T> = Result<T, HistoryRepositoryError>;

/// Persistence contract for history entries.
///
/// The trail is append-only: entries are never edited or individually
/// removed. `purge_for_task` exists solely as the cascade hook invoked when
/// the task itself is deleted.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Appends one entry to the trail.
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()>;

    /// Returns the entries of a task in recording order.
    async fn entries_for_task(&self, task: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>>;

    /// Removes every entry of a task. Cascade hook for task deletion.
    async fn purge_for_task(&self, task: TaskId) -> HistoryRepositoryResult<()>;
}

/// Errors returned by history repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HistoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
