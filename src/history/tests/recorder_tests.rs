//! Recorder tests: stamping, best-effort degradation, and trail reads.

use super::fixtures::{FixedClock, base_time};
use crate::board::domain::{TaskId, UserId};
use crate::history::{
    adapters::memory::InMemoryHistoryStore,
    domain::{HistoryAction, HistoryEntry},
    ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult},
    services::{HistoryRecorder, HistoryRecorderError, RecordEntryRequest},
};
use async_trait::async_trait;
use std::sync::Arc;

fn recorder() -> (
    Arc<InMemoryHistoryStore>,
    HistoryRecorder<InMemoryHistoryStore, FixedClock>,
) {
    let store = Arc::new(InMemoryHistoryStore::new());
    let recorder = HistoryRecorder::new(Arc::clone(&store), Arc::new(FixedClock(base_time())));
    (store, recorder)
}

#[tokio::test(flavor = "multi_thread")]
async fn recording_stamps_the_clock_time() {
    let (store, recorder) = recorder();
    let task = TaskId::new();
    let actor = UserId::new();

    let entry = recorder
        .record(
            RecordEntryRequest::new(task, actor, HistoryAction::PriorityChanged)
                .with_field("priority")
                .with_change(Some("medium".to_owned()), Some("high".to_owned())),
        )
        .await
        .expect("entry records");

    assert_eq!(entry.recorded_at(), base_time());
    assert_eq!(entry.action(), HistoryAction::PriorityChanged);
    assert_eq!(entry.field(), Some("priority"));
    assert_eq!(entry.old_value(), Some("medium"));
    assert_eq!(entry.new_value(), Some("high"));

    let stored = store.entries_for_task(task).await.expect("trail readable");
    assert_eq!(stored, vec![entry]);
}

#[tokio::test(flavor = "multi_thread")]
async fn trail_keeps_recording_order_per_task() {
    let (_, recorder) = recorder();
    let task = TaskId::new();
    let other = TaskId::new();
    let actor = UserId::new();

    recorder
        .record(RecordEntryRequest::new(task, actor, HistoryAction::Created))
        .await
        .expect("entry records");
    recorder
        .record(RecordEntryRequest::new(other, actor, HistoryAction::Created))
        .await
        .expect("entry records");
    recorder
        .record(
            RecordEntryRequest::new(task, actor, HistoryAction::Moved).with_field("column"),
        )
        .await
        .expect("entry records");

    let trail = recorder.audit_trail(task).await.expect("trail readable");
    let actions: Vec<HistoryAction> = trail.iter().map(HistoryEntry::action).collect();
    assert_eq!(actions, vec![HistoryAction::Created, HistoryAction::Moved]);
}

#[tokio::test(flavor = "multi_thread")]
async fn purging_clears_only_the_given_task() {
    let (_, recorder) = recorder();
    let task = TaskId::new();
    let other = TaskId::new();
    let actor = UserId::new();
    recorder
        .record(RecordEntryRequest::new(task, actor, HistoryAction::Created))
        .await
        .expect("entry records");
    recorder
        .record(RecordEntryRequest::new(other, actor, HistoryAction::Created))
        .await
        .expect("entry records");

    recorder.purge_for_task(task).await.expect("trail purges");

    assert!(recorder.audit_trail(task).await.expect("trail readable").is_empty());
    assert_eq!(
        recorder.audit_trail(other).await.expect("trail readable").len(),
        1
    );
}

/// Repository that refuses every append.
struct RefusingHistoryStore;

#[async_trait]
impl HistoryRepository for RefusingHistoryStore {
    async fn append(&self, _entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        Err(HistoryRepositoryError::persistence(std::io::Error::other(
            "disk full",
        )))
    }

    async fn entries_for_task(&self, _task: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        Ok(Vec::new())
    }

    async fn purge_for_task(&self, _task: TaskId) -> HistoryRepositoryResult<()> {
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn best_effort_recording_swallows_repository_failures() {
    let recorder = HistoryRecorder::new(
        Arc::new(RefusingHistoryStore),
        Arc::new(FixedClock(base_time())),
    );
    let request = RecordEntryRequest::new(TaskId::new(), UserId::new(), HistoryAction::Created);

    let strict = recorder.record(request.clone()).await;
    let lenient = recorder.record_best_effort(request).await;

    assert!(matches!(strict, Err(HistoryRecorderError::Repository(_))));
    assert!(lenient.is_none());
}
