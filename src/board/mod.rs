//! Board context: boards, columns, tasks, and the ordering engine.
//!
//! This module implements the Kanban core: the board/column registry, the
//! task aggregate, and the two-phase move pipeline that keeps every column
//! densely ordered.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Board`], [`domain::Column`],
//!   [`domain::Task`], [`domain::BoardView`]) and the stage resolution rules
//! - **Ports**: Abstract trait interfaces ([`ports::BoardRepository`],
//!   [`ports::TaskRepository`])
//! - **Adapters**: Concrete implementations
//!   ([`adapters::memory::InMemoryBoardStore`],
//!   [`adapters::postgres::PostgresBoardStore`])
//! - **Services**: Application services ([`services::BoardRegistry`],
//!   [`services::OrderingEngine`], [`services::TaskService`])
//!
//! # Example
//!
//! ```
//! use niemeyer::board::domain::{Board, Column};
//! use mockable::DefaultClock;
//!
//! let clock = DefaultClock;
//! let board = Board::new("Operations", &clock).expect("valid name");
//! let column = Column::new(board.id(), "A Fazer", "#2ecc71", 0)
//!     .expect("valid name")
//!     .with_stage_key("demanda");
//! assert_eq!(column.board_id(), board.id());
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
