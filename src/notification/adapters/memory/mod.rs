//! In-memory adapters for the notification context.

mod store;

pub use store::InMemoryNotificationStore;
