//! Board-view tests: assembly ordering and the two-phase move engine's
//! shared relocation logic.

use super::fixtures::{FixedClock, base_time, board, column_at, later_time, task_at};
use crate::board::domain::{
    ApprovalStatus, BoardDomainError, BoardView, ColumnId, MoveOutcome, Task, TaskId, TaskStatus,
};
use chrono::Duration;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock(base_time())
}

struct Fixture {
    view: BoardView,
    todo: ColumnId,
    doing: ColumnId,
    tasks: Vec<TaskId>,
}

/// Two-lane board: "A Fazer" holding three tasks, "Em Progresso" holding one.
fn two_lane_board(clock: &FixedClock) -> Fixture {
    let owner = board(clock);
    let todo = column_at(owner.id(), "A Fazer", 0);
    let doing = column_at(owner.id(), "Em Progresso", 1);

    let tasks = vec![
        task_at(owner.id(), &todo, "Primeira", 0, clock),
        task_at(owner.id(), &todo, "Segunda", 1, clock),
        task_at(owner.id(), &todo, "Terceira", 2, clock),
        task_at(owner.id(), &doing, "Em andamento", 0, clock),
    ];
    let ids = tasks.iter().map(Task::id).collect();

    Fixture {
        view: BoardView::assemble(owner.id(), vec![doing.clone(), todo.clone()], tasks),
        todo: todo.id(),
        doing: doing.id(),
        tasks: ids,
    }
}

fn titles(view: &BoardView, column: ColumnId) -> Vec<&str> {
    view.column(column)
        .expect("column on board")
        .tasks()
        .iter()
        .map(Task::title)
        .collect()
}

fn positions(view: &BoardView, column: ColumnId) -> Vec<u32> {
    view.column(column)
        .expect("column on board")
        .tasks()
        .iter()
        .map(Task::position)
        .collect()
}

#[rstest]
fn assemble_orders_columns_and_tasks_by_position(clock: FixedClock) {
    let fixture = two_lane_board(&clock);

    let names: Vec<&str> = fixture
        .view
        .columns()
        .iter()
        .map(|view| view.column().name())
        .collect();
    assert_eq!(names, vec!["A Fazer", "Em Progresso"]);
    assert_eq!(
        titles(&fixture.view, fixture.todo),
        vec!["Primeira", "Segunda", "Terceira"]
    );
}

#[rstest]
fn assemble_drops_tasks_on_unknown_columns(clock: FixedClock) {
    let owner = board(&clock);
    let todo = column_at(owner.id(), "A Fazer", 0);
    let foreign = column_at(owner.id(), "Outra", 0);
    let tasks = vec![
        task_at(owner.id(), &todo, "Visível", 0, &clock),
        task_at(owner.id(), &foreign, "Órfã", 0, &clock),
    ];

    let view = BoardView::assemble(owner.id(), vec![todo.clone()], tasks);

    assert_eq!(titles(&view, todo.id()), vec!["Visível"]);
}

#[rstest]
fn same_column_same_index_is_a_no_op(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let second = fixture.tasks[1];

    let outcome = fixture
        .view
        .apply_move(second, fixture.todo, 1, &clock)
        .expect("move applies");

    assert_eq!(outcome, MoveOutcome::NoOp);
    assert_eq!(
        titles(&fixture.view, fixture.todo),
        vec!["Primeira", "Segunda", "Terceira"]
    );
}

#[rstest]
fn index_beyond_end_clamps_and_detects_no_op(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let third = fixture.tasks[2];

    let outcome = fixture
        .view
        .apply_move(third, fixture.todo, 99, &clock)
        .expect("move applies");

    assert_eq!(outcome, MoveOutcome::NoOp);
}

#[rstest]
fn same_column_reorder_renumbers_densely(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let second = fixture.tasks[1];

    let outcome = fixture
        .view
        .apply_move(second, fixture.todo, 0, &clock)
        .expect("move applies");

    let MoveOutcome::Moved(details) = outcome else {
        panic!("expected a move");
    };
    assert_eq!(details.task.position(), 0);
    assert_eq!(details.source_column, fixture.todo);
    assert_eq!(details.target_column, fixture.todo);
    assert!(!details.entered_approval);
    assert_eq!(
        titles(&fixture.view, fixture.todo),
        vec!["Segunda", "Primeira", "Terceira"]
    );
    assert_eq!(positions(&fixture.view, fixture.todo), vec![0, 1, 2]);
}

#[rstest]
fn cross_column_move_renumbers_both_lanes(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let first = fixture.tasks[0];

    let outcome = fixture
        .view
        .apply_move(first, fixture.doing, 0, &clock)
        .expect("move applies");

    let MoveOutcome::Moved(details) = outcome else {
        panic!("expected a move");
    };
    assert_eq!(details.task.column_id(), fixture.doing);
    assert_eq!(details.task.position(), 0);
    assert_eq!(details.task.status(), TaskStatus::InProgress);
    assert_eq!(titles(&fixture.view, fixture.todo), vec!["Segunda", "Terceira"]);
    assert_eq!(positions(&fixture.view, fixture.todo), vec![0, 1]);
    assert_eq!(
        titles(&fixture.view, fixture.doing),
        vec!["Primeira", "Em andamento"]
    );
    assert_eq!(positions(&fixture.view, fixture.doing), vec![0, 1]);
}

#[rstest]
fn repositions_cover_shifted_neighbours_but_not_the_moved_task(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let first = fixture.tasks[0];

    let outcome = fixture
        .view
        .apply_move(first, fixture.doing, 0, &clock)
        .expect("move applies");

    let MoveOutcome::Moved(details) = outcome else {
        panic!("expected a move");
    };
    assert!(
        details
            .repositions
            .iter()
            .all(|reposition| reposition.task_id != first)
    );
    let shifted: Vec<TaskId> = details
        .repositions
        .iter()
        .map(|reposition| reposition.task_id)
        .collect();
    assert!(shifted.contains(&fixture.tasks[1]));
    assert!(shifted.contains(&fixture.tasks[2]));
    assert!(shifted.contains(&fixture.tasks[3]));
}

#[rstest]
fn insert_index_clamps_to_target_length(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let first = fixture.tasks[0];

    fixture
        .view
        .apply_move(first, fixture.doing, 99, &clock)
        .expect("move applies");

    assert_eq!(
        titles(&fixture.view, fixture.doing),
        vec!["Em andamento", "Primeira"]
    );
}

#[rstest]
fn entering_an_approval_lane_arms_the_window(clock: FixedClock) {
    let owner = board(&clock);
    let doing = column_at(owner.id(), "Em Progresso", 0);
    let review = column_at(owner.id(), "Aprovação", 1)
        .with_stage_key("aprovacao_cliente")
        .with_sla_hours(24);
    let task = task_at(owner.id(), &doing, "Proposta", 0, &clock);
    let task_id = task.id();
    let mut view = BoardView::assemble(owner.id(), vec![doing, review.clone()], vec![task]);

    let later = FixedClock(later_time());
    let outcome = view
        .apply_move(task_id, review.id(), 0, &later)
        .expect("move applies");

    let MoveOutcome::Moved(details) = outcome else {
        panic!("expected a move");
    };
    assert!(details.entered_approval);
    assert_eq!(details.task.status(), TaskStatus::InReview);
    let approval = details
        .task
        .reference_links()
        .client_approval()
        .expect("window armed");
    assert_eq!(approval.status(), ApprovalStatus::Pending);
    assert_eq!(approval.requested_at(), later_time());
    assert_eq!(approval.due_at(), Some(later_time() + Duration::hours(24)));
}

#[rstest]
fn unknown_task_and_column_are_rejected(clock: FixedClock) {
    let mut fixture = two_lane_board(&clock);
    let stranger = TaskId::new();
    let elsewhere = ColumnId::new();

    assert!(matches!(
        fixture.view.apply_move(stranger, fixture.todo, 0, &clock),
        Err(BoardDomainError::TaskNotOnBoard(id)) if id == stranger
    ));
    assert!(matches!(
        fixture.view.apply_move(fixture.tasks[0], elsewhere, 0, &clock),
        Err(BoardDomainError::ColumnNotOnBoard(id)) if id == elsewhere
    ));
}

#[rstest]
fn no_op_detection_leaves_the_view_untouched(clock: FixedClock) {
    let fixture = two_lane_board(&clock);
    let mut mutated = fixture.view.clone();

    mutated
        .apply_move(fixture.tasks[1], fixture.todo, 1, &clock)
        .expect("move applies");

    assert_eq!(mutated, fixture.view);
}

#[rstest]
fn assemble_sorts_columns_supplied_out_of_order(clock: FixedClock) {
    let owner = board(&clock);
    let second = column_at(owner.id(), "Depois", 1);
    let first = column_at(owner.id(), "Antes", 0);

    let view = BoardView::assemble(owner.id(), vec![second, first], Vec::new());

    let names: Vec<&str> = view
        .columns()
        .iter()
        .map(|column| column.column().name())
        .collect();
    assert_eq!(names, vec!["Antes", "Depois"]);
}
