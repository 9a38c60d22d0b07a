//! Niemeyer: Kanban task-board engine.
//!
//! This crate provides the core functionality for running Kanban boards:
//! dense task ordering with two-phase moves, column-driven stage
//! resolution, approval SLA tracking, notification dispatch, and an
//! append-only audit trail.
//!
//! # Architecture
//!
//! Niemeyer follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory,
//!   `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: Boards, columns, tasks, and the ordering engine
//! - [`history`]: Append-only audit trail of task changes
//! - [`notification`]: Per-user notifications and live feeds

pub mod board;
pub mod history;
pub mod notification;
