//! Domain model for the history context: immutable audit entries.

mod entry;
mod error;

pub use entry::{HistoryAction, HistoryEntry, HistoryEntryId, PersistedHistoryEntryData};
pub use error::ParseHistoryActionError;
