//! Approval window tests: first-request-wins SLA stamping and resolution.

use super::fixtures::{FixedClock, base_time, board, column_at, later_time};
use crate::board::domain::{
    ApprovalStatus, BoardDomainError, DEFAULT_SLA_HOURS, ReferenceLinks, Task, TaskPriority,
    TaskStatus,
};
use chrono::Duration;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock(base_time())
}

fn task(clock: &FixedClock) -> Task {
    let owner = board(clock);
    let column = column_at(owner.id(), "Em Progresso", 0);
    Task::new(
        owner.id(),
        column.id(),
        "Relatório mensal",
        TaskPriority::High,
        TaskStatus::InProgress,
        0,
        clock,
    )
    .expect("valid title")
}

#[rstest]
fn first_entry_arms_window_with_column_sla(clock: FixedClock) {
    let mut task = task(&clock);

    task.enter_approval(Some(24), &clock);

    let approval = task
        .reference_links()
        .client_approval()
        .expect("window armed");
    assert_eq!(approval.status(), ApprovalStatus::Pending);
    assert_eq!(approval.requested_at(), base_time());
    assert_eq!(approval.due_at(), Some(base_time() + Duration::hours(24)));
}

#[rstest]
fn missing_column_sla_defaults_to_48_hours(clock: FixedClock) {
    let mut task = task(&clock);

    task.enter_approval(None, &clock);

    let approval = task
        .reference_links()
        .client_approval()
        .expect("window armed");
    assert_eq!(
        approval.due_at(),
        Some(base_time() + Duration::hours(i64::from(DEFAULT_SLA_HOURS)))
    );
}

#[rstest]
fn re_entry_keeps_original_request_and_deadline(clock: FixedClock) {
    let mut task = task(&clock);
    task.enter_approval(Some(24), &clock);

    let later = FixedClock(later_time());
    task.resolve_approval(ApprovalStatus::Rejected, &later)
        .expect("window exists");
    task.enter_approval(Some(72), &later);

    let approval = task
        .reference_links()
        .client_approval()
        .expect("window armed");
    assert_eq!(approval.status(), ApprovalStatus::Pending);
    assert_eq!(approval.requested_at(), base_time());
    assert_eq!(approval.due_at(), Some(base_time() + Duration::hours(24)));
}

#[rstest]
fn resolution_records_decision(clock: FixedClock) {
    let mut task = task(&clock);
    task.enter_approval(Some(24), &clock);

    task.resolve_approval(ApprovalStatus::Approved, &clock)
        .expect("window exists");

    let approval = task
        .reference_links()
        .client_approval()
        .expect("window armed");
    assert_eq!(approval.status(), ApprovalStatus::Approved);
}

#[rstest]
fn resolving_without_window_fails(clock: FixedClock) {
    let mut task = task(&clock);

    let result = task.resolve_approval(ApprovalStatus::Approved, &clock);

    assert!(matches!(
        result,
        Err(BoardDomainError::NoApprovalWindow(id)) if id == task.id()
    ));
}

#[rstest]
fn arming_preserves_foreign_reference_link_keys() {
    let raw = serde_json::json!({
        "crm_deal": "deal-4711",
        "migration": { "source": "legacy-board-2" }
    });
    let mut links: ReferenceLinks = serde_json::from_value(raw).expect("valid blob");

    links.arm_approval(base_time(), Some(24));

    let serialized = serde_json::to_value(&links).expect("serializable blob");
    assert_eq!(serialized["crm_deal"], "deal-4711");
    assert_eq!(serialized["migration"]["source"], "legacy-board-2");
    assert_eq!(serialized["client_approval"]["status"], "pending");
}

#[rstest]
#[case("pending", ApprovalStatus::Pending)]
#[case("Approved", ApprovalStatus::Approved)]
#[case(" REJECTED ", ApprovalStatus::Rejected)]
fn approval_status_parses(#[case] raw: &str, #[case] expected: ApprovalStatus) {
    assert_eq!(
        ApprovalStatus::try_from(raw).expect("known status"),
        expected
    );
}
