//! Storage adapters implementing the notification-context ports.

pub mod memory;
pub mod postgres;
