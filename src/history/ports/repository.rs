//! Repository port for append-only history persistence.

use crate::history::domain::{HistoryEntry, HistoryEntryId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history repository operations.
pub type HistoryRepositoryResult<T> = Result<T, HistoryRepositoryError>;

/// Append-only history persistence contract.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Appends an entry to the trail.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryRepositoryError::DuplicateEntry`] when the entry ID
    /// already exists.
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()>;

    /// Returns every entry recorded for a task, newest first.
    ///
    /// Entries for deleted tasks remain retrievable.
    async fn list_for_task(&self, task_id: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>>;
}

/// Errors returned by history repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate history entry identifier: {0}")]
    DuplicateEntry(HistoryEntryId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HistoryRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl crate::postgres::PersistenceFailure for HistoryRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}
