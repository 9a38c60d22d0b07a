//! History recorder: builds and appends audit entries for task changes.

use crate::board::domain::{TaskId, UserId};
use crate::history::{
    domain::{HistoryAction, HistoryEntry},
    ports::{HistoryRepository, HistoryRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the history recorder.
#[derive(Debug, Clone, Error)]
pub enum HistoryRecorderError {
    /// The underlying repository failed.
    #[error(transparent)]
    Repository(#[from] HistoryRepositoryError),
}

/// Request to record one audit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntryRequest {
    task_id: TaskId,
    actor: UserId,
    action: HistoryAction,
    field: Option<String>,
    old_value: Option<String>,
    new_value: Option<String>,
}

impl RecordEntryRequest {
    /// Creates a request for the given task, actor, and action.
    #[must_use]
    pub const fn new(task_id: TaskId, actor: UserId, action: HistoryAction) -> Self {
        Self {
            task_id,
            actor,
            action,
            field: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Names the changed field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Captures the before/after values of the change.
    #[must_use]
    pub fn with_change(mut self, old_value: Option<String>, new_value: Option<String>) -> Self {
        self.old_value = old_value;
        self.new_value = new_value;
        self
    }
}

/// Application service recording and reading the audit trail.
#[derive(Debug)]
pub struct HistoryRecorder<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for HistoryRecorder<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> HistoryRecorder<R, C>
where
    R: HistoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a recorder over the given repository and clock.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records one entry, returning it stamped with the recording time.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryRecorderError::Repository`] when the append fails.
    pub async fn record(
        &self,
        request: RecordEntryRequest,
    ) -> Result<HistoryEntry, HistoryRecorderError> {
        let mut entry = HistoryEntry::new(
            request.task_id,
            request.actor,
            request.action,
            self.clock.as_ref(),
        );
        if let Some(field) = request.field {
            entry = entry.with_field(field);
        }
        entry = entry.with_change(request.old_value, request.new_value);

        self.repository.append(&entry).await?;
        Ok(entry)
    }

    /// Records an entry, logging instead of failing when the append fails.
    ///
    /// The audit trail must never veto the operation it documents.
    pub async fn record_best_effort(&self, request: RecordEntryRequest) -> Option<HistoryEntry> {
        match self.record(request).await {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "failed to record history entry");
                None
            }
        }
    }

    /// Returns the full audit trail of a task in recording order.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryRecorderError::Repository`] when the read fails.
    pub async fn audit_trail(
        &self,
        task: TaskId,
    ) -> Result<Vec<HistoryEntry>, HistoryRecorderError> {
        Ok(self.repository.entries_for_task(task).await?)
    }

    /// Removes the trail of a deleted task. Cascade hook only.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryRecorderError::Repository`] when the purge fails.
    pub async fn purge_for_task(&self, task: TaskId) -> Result<(), HistoryRecorderError> {
        Ok(self.repository.purge_for_task(task).await?)
    }
}
