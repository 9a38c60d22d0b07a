//! In-memory history store for tests and ephemeral deployments.

use crate::board::domain::TaskId;
use crate::history::domain::HistoryEntry;
use crate::history::ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Append-only in-memory implementation of [`HistoryRepository`].
///
/// Cloning shares the underlying trail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> HistoryRepositoryError {
    HistoryRepositoryError::persistence(std::io::Error::other("history store lock poisoned"))
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn entries_for_task(&self, task: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .iter()
            .filter(|entry| entry.task_id() == task)
            .cloned()
            .collect())
    }

    async fn purge_for_task(&self, task: TaskId) -> HistoryRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.retain(|entry| entry.task_id() != task);
        Ok(())
    }
}
