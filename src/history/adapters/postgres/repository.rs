//! `PostgreSQL` store implementation for the history trail.

use super::conversion::{entry_to_new_row, row_to_entry};
use super::models::HistoryEntryRow;
use super::schema::history_entries;
use crate::board::domain::TaskId;
use crate::history::{
    domain::HistoryEntry,
    ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by history adapters.
pub type HistoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed implementation of [`HistoryRepository`].
#[derive(Debug, Clone)]
pub struct PostgresHistoryStore {
    pool: HistoryPgPool,
}

impl PostgresHistoryStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: HistoryPgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> HistoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> HistoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(HistoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(HistoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        let new_row = entry_to_new_row(entry);

        self.run(move |connection| {
            diesel::insert_into(history_entries::table)
                .values(&new_row)
                .execute(connection)
                .map_err(HistoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn entries_for_task(&self, task: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        self.run(move |connection| {
            let rows = history_entries::table
                .filter(history_entries::task_id.eq(task.into_inner()))
                .order((
                    history_entries::recorded_at.asc(),
                    history_entries::seq.asc(),
                ))
                .select(HistoryEntryRow::as_select())
                .load::<HistoryEntryRow>(connection)
                .map_err(HistoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn purge_for_task(&self, task: TaskId) -> HistoryRepositoryResult<()> {
        self.run(move |connection| {
            diesel::delete(
                history_entries::table.filter(history_entries::task_id.eq(task.into_inner())),
            )
            .execute(connection)
            .map_err(HistoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}
