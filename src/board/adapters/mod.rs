//! Storage adapters implementing the board-context ports.

pub mod memory;
pub mod postgres;
