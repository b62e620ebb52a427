//! Per-member admission control for in-progress work.

use crate::member::domain::MemberId;
use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use std::sync::Arc;

/// Most in-progress tasks a member may hold.
pub const MAX_IN_PROGRESS_PER_MEMBER: u64 = 5;

/// Decides whether a member may take another in-progress task.
///
/// The decision reads current state only and takes no reservation, so two
/// callers admitting the same member concurrently can both succeed.
pub struct AdmissionController<T>
where
    T: TaskRepository + ?Sized,
{
    repository: Arc<T>,
}

impl<T> Clone for AdmissionController<T>
where
    T: TaskRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T> AdmissionController<T>
where
    T: TaskRepository + ?Sized,
{
    /// Creates a controller over the task store.
    #[must_use]
    pub const fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Counts the member's in-progress tasks. No member means no load.
    ///
    /// # Errors
    ///
    /// Returns the repository error when counting fails.
    pub async fn count_in_progress(&self, member_id: Option<MemberId>) -> TaskRepositoryResult<u64> {
        match member_id {
            Some(id) => self.repository.count_in_progress_for(id).await,
            None => Ok(0),
        }
    }

    /// Returns whether the member is below [`MAX_IN_PROGRESS_PER_MEMBER`].
    ///
    /// # Errors
    ///
    /// Returns the repository error when counting fails.
    pub async fn can_assign(&self, member_id: Option<MemberId>) -> TaskRepositoryResult<bool> {
        let count = self.count_in_progress(member_id).await?;
        Ok(count < MAX_IN_PROGRESS_PER_MEMBER)
    }
}
