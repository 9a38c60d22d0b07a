//! Registry tests: board and column lifecycle over the in-memory store.

use super::fixtures::{FixedClock, base_time};
use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{BoardDomainError, BoardId, ColumnId, Task, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::{BoardRegistry, CreateBoardRequest, CreateColumnRequest, RegistryError},
};
use std::sync::Arc;

fn registry() -> (
    Arc<InMemoryBoardStore>,
    BoardRegistry<InMemoryBoardStore, FixedClock>,
) {
    let store = Arc::new(InMemoryBoardStore::new());
    let registry = BoardRegistry::new(Arc::clone(&store), Arc::new(FixedClock(base_time())));
    (store, registry)
}

#[tokio::test(flavor = "multi_thread")]
async fn creates_and_finds_a_board() {
    let (_, registry) = registry();

    let created = registry
        .create_board(
            CreateBoardRequest::new("Operations").with_description("Fluxo operacional"),
        )
        .await
        .expect("board creates");

    let found = registry.board(created.id()).await.expect("board found");
    assert_eq!(found, created);
    assert_eq!(found.description(), Some("Fluxo operacional"));
    assert_eq!(found.created_at(), base_time());
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_board_name_is_rejected() {
    let (_, registry) = registry();

    let result = registry.create_board(CreateBoardRequest::new("   ")).await;

    assert!(matches!(
        result,
        Err(RegistryError::Domain(BoardDomainError::EmptyBoardName))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn filters_boards_by_area() {
    let (_, registry) = registry();
    registry
        .create_board(CreateBoardRequest::new("Comercial").with_area_key("sales"))
        .await
        .expect("board creates");
    registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");

    let all = registry.boards_for(None).await.expect("boards readable");
    assert_eq!(all.len(), 2);

    let sales = registry
        .boards_for(Some("sales"))
        .await
        .expect("boards readable");
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].name(), "Comercial");
}

#[tokio::test(flavor = "multi_thread")]
async fn columns_append_at_the_end_of_the_lane_order() {
    let (_, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");

    let first = registry
        .create_column(CreateColumnRequest::new(board.id(), "A Fazer", "#3498db"))
        .await
        .expect("column creates");
    let second = registry
        .create_column(
            CreateColumnRequest::new(board.id(), "Aprovação", "#e67e22")
                .with_stage_key("aprovacao_cliente")
                .with_sla_hours(24)
                .with_wip_limit(5),
        )
        .await
        .expect("column creates");

    assert_eq!(first.position(), 0);
    assert_eq!(second.position(), 1);
    assert_eq!(second.stage_key(), Some("aprovacao_cliente"));
    assert_eq!(second.sla_hours(), Some(24));
    assert_eq!(second.wip_limit(), Some(5));

    let columns = registry.columns_of(board.id()).await.expect("columns readable");
    let names: Vec<&str> = columns.iter().map(|column| column.name()).collect();
    assert_eq!(names, vec!["A Fazer", "Aprovação"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn renames_a_column_in_place() {
    let (_, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");
    let column = registry
        .create_column(CreateColumnRequest::new(board.id(), "A Fazer", "#3498db"))
        .await
        .expect("column creates");

    let renamed = registry
        .rename_column(column.id(), "Fila de Entrada")
        .await
        .expect("column renames");

    assert_eq!(renamed.name(), "Fila de Entrada");
    let columns = registry.columns_of(board.id()).await.expect("columns readable");
    assert_eq!(columns[0].name(), "Fila de Entrada");
}

#[tokio::test(flavor = "multi_thread")]
async fn renaming_an_unknown_column_fails() {
    let (_, registry) = registry();
    let stranger = ColumnId::new();

    let result = registry.rename_column(stranger, "Nova").await;

    assert!(matches!(
        result,
        Err(RegistryError::ColumnNotFound(id)) if id == stranger
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn area_bound_boards_refuse_deletion() {
    let (_, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Comercial").with_area_key("sales"))
        .await
        .expect("board creates");

    let result = registry.delete_board(board.id()).await;

    assert!(matches!(
        result,
        Err(RegistryError::Domain(BoardDomainError::ProtectedBoard(id))) if id == board.id()
    ));
    assert!(registry.board(board.id()).await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_board_cascades_to_its_tasks() {
    let (store, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");
    let column = registry
        .create_column(CreateColumnRequest::new(board.id(), "A Fazer", "#3498db"))
        .await
        .expect("column creates");
    let clock = FixedClock(base_time());
    let task = Task::new(
        board.id(),
        column.id(),
        "Relatório",
        TaskPriority::Medium,
        TaskStatus::Todo,
        0,
        &clock,
    )
    .expect("valid task title");
    store.create_task(&task).await.expect("task stored");

    registry.delete_board(board.id()).await.expect("board deletes");

    assert!(matches!(
        registry.board(board.id()).await,
        Err(RegistryError::BoardNotFound(_))
    ));
    assert_eq!(store.find_task(task.id()).await.expect("task readable"), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_column_cascades_to_its_tasks() {
    let (store, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");
    let column = registry
        .create_column(CreateColumnRequest::new(board.id(), "A Fazer", "#3498db"))
        .await
        .expect("column creates");
    let clock = FixedClock(base_time());
    let task = Task::new(
        board.id(),
        column.id(),
        "Relatório",
        TaskPriority::Medium,
        TaskStatus::Todo,
        0,
        &clock,
    )
    .expect("valid task title");
    store.create_task(&task).await.expect("task stored");

    registry.delete_column(column.id()).await.expect("column deletes");

    let columns = registry.columns_of(board.id()).await.expect("columns readable");
    assert!(columns.is_empty());
    assert_eq!(store.find_task(task.id()).await.expect("task readable"), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_column_renumbers_the_survivors() {
    let (_, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");
    let mut lanes = Vec::new();
    for name in ["A Fazer", "Em Progresso", "Concluído"] {
        lanes.push(
            registry
                .create_column(CreateColumnRequest::new(board.id(), name, "#3498db"))
                .await
                .expect("column creates"),
        );
    }

    registry.delete_column(lanes[1].id()).await.expect("column deletes");
    let added = registry
        .create_column(CreateColumnRequest::new(board.id(), "Arquivado", "#7f8c8d"))
        .await
        .expect("column creates");

    assert_eq!(added.position(), 2);
    let columns = registry.columns_of(board.id()).await.expect("columns readable");
    let ranking: Vec<(&str, u32)> = columns
        .iter()
        .map(|column| (column.name(), column.position()))
        .collect();
    assert_eq!(
        ranking,
        vec![("A Fazer", 0), ("Concluído", 1), ("Arquivado", 2)]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn assembles_the_board_view() {
    let (store, registry) = registry();
    let board = registry
        .create_board(CreateBoardRequest::new("Operations"))
        .await
        .expect("board creates");
    let todo = registry
        .create_column(CreateColumnRequest::new(board.id(), "A Fazer", "#3498db"))
        .await
        .expect("column creates");
    let doing = registry
        .create_column(CreateColumnRequest::new(board.id(), "Em Progresso", "#f1c40f"))
        .await
        .expect("column creates");
    let clock = FixedClock(base_time());
    for (position, title) in ["Primeira", "Segunda"].into_iter().enumerate() {
        let task = Task::new(
            board.id(),
            todo.id(),
            title,
            TaskPriority::Medium,
            TaskStatus::Todo,
            u32::try_from(position).expect("small position"),
            &clock,
        )
        .expect("valid task title");
        store.create_task(&task).await.expect("task stored");
    }

    let view = registry.board_view(board.id()).await.expect("view assembles");

    assert_eq!(view.board_id(), board.id());
    let titles: Vec<&str> = view
        .column(todo.id())
        .expect("column on board")
        .tasks()
        .iter()
        .map(Task::title)
        .collect();
    assert_eq!(titles, vec!["Primeira", "Segunda"]);
    assert!(
        view.column(doing.id())
            .expect("column on board")
            .tasks()
            .is_empty()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_board_view_is_reported() {
    let (_, registry) = registry();
    let stranger = BoardId::new();

    assert!(matches!(
        registry.board_view(stranger).await,
        Err(RegistryError::BoardNotFound(id)) if id == stranger
    ));
}
