//! Storage adapters implementing the history-context ports.

pub mod memory;
pub mod postgres;
