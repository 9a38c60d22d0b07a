//! Behavioural integration test for the in-memory board stack.
//!
//! Exercises the full engine the way an operator-facing surface would:
//! board and column setup, task creation, drag-and-drop moves with approval
//! stamping, comments, notifications, the audit trail, and deletion rules.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use mockable::DefaultClock;
use niemeyer::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{ApprovalStatus, BoardDomainError, MoveOutcome, TaskPriority, TaskStatus, UserId},
    services::{
        AddCommentRequest, BoardRegistry, CreateBoardRequest, CreateColumnRequest,
        CreateTaskRequest, MoveTaskRequest, OrderingEngine, RegistryError, TaskService,
    },
};
use niemeyer::history::{
    adapters::memory::InMemoryHistoryStore, domain::HistoryAction, services::HistoryRecorder,
};
use niemeyer::notification::{
    adapters::memory::InMemoryNotificationStore, domain::NotificationKind,
    services::NotificationDispatcher,
};
use std::sync::Arc;

struct Stack {
    registry: BoardRegistry<InMemoryBoardStore, DefaultClock>,
    tasks: TaskService<InMemoryBoardStore, InMemoryHistoryStore, InMemoryNotificationStore, DefaultClock>,
    ordering:
        OrderingEngine<InMemoryBoardStore, InMemoryHistoryStore, InMemoryNotificationStore, DefaultClock>,
    notifier: NotificationDispatcher<InMemoryNotificationStore, DefaultClock>,
}

fn stack() -> Stack {
    let store = Arc::new(InMemoryBoardStore::new());
    let history = Arc::new(InMemoryHistoryStore::new());
    let notifications = Arc::new(InMemoryNotificationStore::new());
    let clock = Arc::new(DefaultClock);

    let recorder = HistoryRecorder::new(history, Arc::clone(&clock));
    let notifier = NotificationDispatcher::new(notifications, Arc::clone(&clock));

    Stack {
        registry: BoardRegistry::new(Arc::clone(&store), Arc::clone(&clock)),
        tasks: TaskService::new(
            Arc::clone(&store),
            recorder.clone(),
            notifier.clone(),
            Arc::clone(&clock),
        ),
        ordering: OrderingEngine::new(store, recorder, notifier.clone(), clock),
        notifier,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn full_board_lifecycle() {
    let stack = stack();
    let operator = UserId::new();
    let analyst = UserId::new();

    // Board and lane setup.
    let board = stack
        .registry
        .create_board(CreateBoardRequest::new("Comercial").with_description("Funil de propostas"))
        .await
        .expect("board creates");
    let entrada = stack
        .registry
        .create_column(
            CreateColumnRequest::new(board.id(), "Demanda", "#95a5a6").with_stage_key("demanda"),
        )
        .await
        .expect("column creates");
    let progresso = stack
        .registry
        .create_column(CreateColumnRequest::new(board.id(), "Em Progresso", "#f1c40f"))
        .await
        .expect("column creates");
    let aprovacao = stack
        .registry
        .create_column(
            CreateColumnRequest::new(board.id(), "Aprovação do Cliente", "#e67e22")
                .with_stage_key("aprovacao_cliente")
                .with_sla_hours(24),
        )
        .await
        .expect("column creates");

    // Tasks land at the end of their lane with the lane's status.
    let proposta = stack
        .tasks
        .create_task(
            CreateTaskRequest::new(board.id(), entrada.id(), "Proposta Acme", operator)
                .with_priority(TaskPriority::High)
                .with_assignee(analyst),
        )
        .await
        .expect("task creates");
    let followup = stack
        .tasks
        .create_task(CreateTaskRequest::new(
            board.id(),
            entrada.id(),
            "Follow-up Beta",
            operator,
        ))
        .await
        .expect("task creates");
    assert_eq!(proposta.status(), TaskStatus::Todo);
    assert_eq!(proposta.position(), 0);
    assert_eq!(followup.position(), 1);

    // The assignee hears about the new task.
    let mut feed = stack.notifier.subscribe(analyst).expect("feed subscribes");
    let inbox = stack
        .notifier
        .notifications_for(analyst, true)
        .await
        .expect("inbox readable");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind(), NotificationKind::Assignment);
    assert_eq!(inbox[0].triggered_by(), operator);

    // Drag the proposal into work, then into client approval.
    stack
        .ordering
        .commit_move(MoveTaskRequest {
            board_id: board.id(),
            task_id: proposta.id(),
            target_column: progresso.id(),
            target_index: 0,
            actor: operator,
        })
        .await
        .expect("move commits");
    let committed = stack
        .ordering
        .commit_move(MoveTaskRequest {
            board_id: board.id(),
            task_id: proposta.id(),
            target_column: aprovacao.id(),
            target_index: 0,
            actor: operator,
        })
        .await
        .expect("move commits");

    let MoveOutcome::Moved(details) = &committed.outcome else {
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
    assert!(approval.due_at().is_some());

    // The assignee's live feed saw both moves.
    let first_move = feed.recv().await.expect("feed delivers");
    assert_eq!(first_move.kind(), NotificationKind::Move);
    let second_move = feed.recv().await.expect("feed delivers");
    assert_eq!(second_move.body(), Some("Moved to Aprovação do Cliente"));

    // The source lane renumbered densely.
    let view = stack.registry.board_view(board.id()).await.expect("view assembles");
    let entrada_tasks = view.column(entrada.id()).expect("column on board").tasks();
    assert_eq!(entrada_tasks.len(), 1);
    assert_eq!(entrada_tasks[0].id(), followup.id());
    assert_eq!(entrada_tasks[0].position(), 0);

    // The client approves; the window resolves without re-arming.
    let approved = stack
        .tasks
        .resolve_approval(proposta.id(), ApprovalStatus::Approved, operator)
        .await
        .expect("approval resolves");
    assert_eq!(
        approved
            .reference_links()
            .client_approval()
            .expect("window armed")
            .status(),
        ApprovalStatus::Approved
    );

    // Discussion lands on the task and notifies the assignee.
    stack
        .tasks
        .add_comment(AddCommentRequest::new(
            proposta.id(),
            operator,
            "Cliente aprovou por e-mail",
        ))
        .await
        .expect("comment appends");
    let comments = stack
        .tasks
        .comments_of(proposta.id())
        .await
        .expect("comments readable");
    assert_eq!(comments.len(), 1);

    // The audit trail documents the whole story in order.
    let trail = stack
        .tasks
        .audit_trail(proposta.id())
        .await
        .expect("trail readable");
    let actions: Vec<HistoryAction> = trail.iter().map(|entry| entry.action()).collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Created,
            HistoryAction::Moved,
            HistoryAction::Moved,
            HistoryAction::Updated,
            HistoryAction::Updated,
        ]
    );

    // Deleting the task clears its trail; deleting the board cascades.
    stack
        .tasks
        .delete_task(followup.id())
        .await
        .expect("task deletes");
    stack
        .registry
        .delete_board(board.id())
        .await
        .expect("board deletes");
    assert!(matches!(
        stack.registry.board(board.id()).await,
        Err(RegistryError::BoardNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn area_bound_boards_survive_deletion_attempts() {
    let stack = stack();

    let board = stack
        .registry
        .create_board(CreateBoardRequest::new("Operações").with_area_key("operations"))
        .await
        .expect("board creates");

    let result = stack.registry.delete_board(board.id()).await;

    assert!(matches!(
        result,
        Err(RegistryError::Domain(BoardDomainError::ProtectedBoard(_)))
    ));
    assert!(stack.registry.board(board.id()).await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_task_onto_its_own_slot_changes_nothing() {
    let stack = stack();
    let operator = UserId::new();
    let board = stack
        .registry
        .create_board(CreateBoardRequest::new("Operações"))
        .await
        .expect("board creates");
    let lane = stack
        .registry
        .create_column(CreateColumnRequest::new(board.id(), "A Fazer", "#3498db"))
        .await
        .expect("column creates");
    let task = stack
        .tasks
        .create_task(CreateTaskRequest::new(
            board.id(),
            lane.id(),
            "Imóvel",
            operator,
        ))
        .await
        .expect("task creates");

    let committed = stack
        .ordering
        .commit_move(MoveTaskRequest {
            board_id: board.id(),
            task_id: task.id(),
            target_column: lane.id(),
            target_index: 0,
            actor: operator,
        })
        .await
        .expect("move commits");

    assert_eq!(committed.outcome, MoveOutcome::NoOp);
    let trail = stack
        .tasks
        .audit_trail(task.id())
        .await
        .expect("trail readable");
    let actions: Vec<HistoryAction> = trail.iter().map(|entry| entry.action()).collect();
    assert_eq!(actions, vec![HistoryAction::Created]);
}
