//! Best-effort audit trail recording and history lookup.

use crate::error::ErrorKind;
use crate::history::{
    domain::{HistoryAction, HistoryEntry},
    ports::{HistoryRepository, HistoryRepositoryError},
};
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for history lookup.
///
/// Recording never surfaces errors; only reads do.
#[derive(Debug, Error)]
pub enum AuditTrailError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] HistoryRepositoryError),
}

impl AuditTrailError {
    /// Classifies the error for inbound transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for audit trail lookups.
pub type AuditTrailResult<T> = Result<T, AuditTrailError>;

/// Records history entries on behalf of the workflow engine.
pub struct AuditTrailRecorder<H, C>
where
    H: HistoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<H>,
    clock: Arc<C>,
}

impl<H, C> Clone for AuditTrailRecorder<H, C>
where
    H: HistoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<H, C> AuditTrailRecorder<H, C>
where
    H: HistoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new recorder.
    #[must_use]
    pub const fn new(repository: Arc<H>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends an entry for a task mutation.
    ///
    /// Failures are logged and swallowed so the calling mutation still
    /// succeeds. Returns the stored entry, or `None` when the write failed.
    pub async fn record(
        &self,
        task_id: TaskId,
        action: HistoryAction,
        details: impl Into<String>,
    ) -> Option<HistoryEntry> {
        let entry = HistoryEntry::new(task_id, action, details, &*self.clock);
        match self.repository.append(&entry).await {
            Ok(()) => {
                debug!(%task_id, action = %action, "history entry recorded");
                Some(entry)
            }
            Err(err) => {
                warn!(%task_id, action = %action, error = %err, "failed to record history entry");
                None
            }
        }
    }

    /// Returns all entries for a task, newest first.
    ///
    /// The task need not exist any more.
    ///
    /// # Errors
    ///
    /// Returns [`AuditTrailError::Repository`] when persistence lookup fails.
    pub async fn list_for_task(&self, task_id: TaskId) -> AuditTrailResult<Vec<HistoryEntry>> {
        Ok(self.repository.list_for_task(task_id).await?)
    }
}
