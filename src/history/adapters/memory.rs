//! In-memory repository for the audit trail.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::history::{
    domain::{HistoryEntry, HistoryEntryId},
    ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory history repository.
///
/// Entries are kept in insertion order; reads sort by timestamp.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryRepository {
    state: Arc<RwLock<HistoryState>>,
}

#[derive(Debug, Default)]
struct HistoryState {
    entries: Vec<HistoryEntry>,
    ids: HashSet<HistoryEntryId>,
}

impl InMemoryHistoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> HistoryRepositoryError {
    HistoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.ids.insert(entry.id()) {
            return Err(HistoryRepositoryError::DuplicateEntry(entry.id()));
        }
        state.entries.push(entry.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<HistoryEntry> = state
            .entries
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        // Stable sort over reversed insertion order keeps same-instant entries
        // newest first as well.
        matching.reverse();
        matching.sort_by_key(|entry| Reverse(entry.timestamp()));
        Ok(matching)
    }
}
