//! In-memory adapters for the history context.

mod store;

pub use store::InMemoryHistoryStore;
