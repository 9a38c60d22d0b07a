//! `PostgreSQL` adapters for the history context.

mod conversion;
mod models;
mod repository;
mod schema;

pub use repository::{HistoryPgPool, PostgresHistoryStore};

#[cfg(test)]
pub(crate) use conversion::{entry_to_new_row, row_to_entry};
#[cfg(test)]
pub(crate) use models::HistoryEntryRow;
