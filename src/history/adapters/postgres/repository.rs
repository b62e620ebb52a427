//! `PostgreSQL` repository implementation for the audit trail.

use super::{
    models::{HistoryRow, NewHistoryRow},
    schema::task_history,
};
use crate::history::{
    domain::{HistoryAction, HistoryEntry, HistoryEntryId, PersistedHistoryEntryData},
    ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult},
};
use crate::postgres::{PgPool, run_blocking};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed history repository.
#[derive(Debug, Clone)]
pub struct PostgresHistoryRepository {
    pool: PgPool,
}

impl PostgresHistoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        let entry_id = entry.id();
        let new_row = to_new_row(entry);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(task_history::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        HistoryRepositoryError::DuplicateEntry(entry_id)
                    }
                    _ => HistoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        run_blocking(&self.pool, move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .order(task_history::timestamp.desc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(HistoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn to_new_row(entry: &HistoryEntry) -> NewHistoryRow {
    NewHistoryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        action: entry.action().as_str().to_owned(),
        details: entry.details().to_owned(),
        timestamp: entry.timestamp(),
    }
}

fn row_to_entry(row: HistoryRow) -> HistoryRepositoryResult<HistoryEntry> {
    let HistoryRow {
        id,
        task_id,
        action: persisted_action,
        details,
        timestamp,
    } = row;

    let action = HistoryAction::try_from(persisted_action.as_str())
        .map_err(HistoryRepositoryError::invalid_persisted_data)?;

    Ok(HistoryEntry::from_persisted(PersistedHistoryEntryData {
        id: HistoryEntryId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        action,
        details,
        timestamp,
    }))
}
