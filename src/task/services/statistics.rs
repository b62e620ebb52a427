//! Board statistics: per-column counts and completion ratio.

use crate::error::ErrorKind;
use crate::member::{
    domain::{MemberId, UNASSIGNED_LABEL, UNKNOWN_MEMBER_LABEL},
    ports::{MemberRepository, MemberRepositoryError},
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskFilter, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Aggregate counts over a set of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStatistics {
    /// Number of tasks counted.
    pub total: u64,
    /// Number of `done` tasks.
    pub completed: u64,
    /// `completed / total` as a percentage rounded down; zero for no tasks.
    pub completion_percent: u64,
    /// Count per status, every status present, in board column order.
    pub by_status: Vec<(TaskStatus, u64)>,
    /// Count per priority, every priority present, low to high.
    pub by_priority: Vec<(TaskPriority, u64)>,
    /// Count per assignee, keyed by member id; `None` collects unassigned
    /// tasks. Members sharing a display name keep separate entries.
    pub by_assignee: BTreeMap<Option<MemberId>, AssigneeCount>,
}

/// Tasks held by one assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeCount {
    /// Display name, or a fallback label for unassigned or deleted members.
    pub label: String,
    /// Number of tasks.
    pub count: u64,
}

impl BoardStatistics {
    /// Tallies the tasks, naming assignees through `label_for`.
    #[must_use]
    pub fn tally<F>(tasks: &[Task], mut label_for: F) -> Self
    where
        F: FnMut(Option<MemberId>) -> String,
    {
        let mut by_status: Vec<(TaskStatus, u64)> =
            TaskStatus::ALL.iter().map(|status| (*status, 0)).collect();
        let mut by_priority: Vec<(TaskPriority, u64)> =
            TaskPriority::ALL.iter().map(|priority| (*priority, 0)).collect();
        let mut by_assignee: BTreeMap<Option<MemberId>, AssigneeCount> = BTreeMap::new();
        let mut total: u64 = 0;

        for task in tasks {
            total = total.saturating_add(1);
            bump(&mut by_status, task.status());
            bump(&mut by_priority, task.priority());
            let assignee = task.assignee_id();
            let entry = by_assignee.entry(assignee).or_insert_with(|| AssigneeCount {
                label: label_for(assignee),
                count: 0,
            });
            entry.count = entry.count.saturating_add(1);
        }

        let completed = lookup(&by_status, TaskStatus::Done);
        let completion_percent = completed
            .saturating_mul(100)
            .checked_div(total)
            .unwrap_or(0);

        Self {
            total,
            completed,
            completion_percent,
            by_status,
            by_priority,
            by_assignee,
        }
    }

    /// Returns the count for one status.
    #[must_use]
    pub fn status_count(&self, status: TaskStatus) -> u64 {
        lookup(&self.by_status, status)
    }

    /// Returns the count for one priority.
    #[must_use]
    pub fn priority_count(&self, priority: TaskPriority) -> u64 {
        lookup(&self.by_priority, priority)
    }

    /// Returns the count for one member, or for unassigned tasks with `None`.
    #[must_use]
    pub fn member_count(&self, member_id: Option<MemberId>) -> u64 {
        self.by_assignee.get(&member_id).map_or(0, |entry| entry.count)
    }

    /// Returns the summed count of every assignee shown under `label`.
    #[must_use]
    pub fn assignee_count(&self, label: &str) -> u64 {
        self.by_assignee
            .values()
            .filter(|entry| entry.label == label)
            .fold(0, |sum, entry| sum.saturating_add(entry.count))
    }
}

fn bump<K: PartialEq>(counts: &mut [(K, u64)], key: K) {
    if let Some((_, count)) = counts.iter_mut().find(|(candidate, _)| *candidate == key) {
        *count = count.saturating_add(1);
    }
}

fn lookup<K: PartialEq>(counts: &[(K, u64)], key: K) -> u64 {
    counts
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map_or(0, |(_, count)| *count)
}

/// Errors raised while computing statistics.
#[derive(Debug, Error)]
pub enum BoardStatisticsError {
    /// Listing tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Resolving assignee names failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),
}

impl BoardStatisticsError {
    /// Classifies the error for inbound transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Tasks(_) | Self::Members(_) => ErrorKind::Storage,
        }
    }
}

/// Computes board statistics over the task and member stores.
pub struct BoardStatisticsService<T, M>
where
    T: TaskRepository + ?Sized,
    M: MemberRepository + ?Sized,
{
    tasks: Arc<T>,
    members: Arc<M>,
}

impl<T, M> Clone for BoardStatisticsService<T, M>
where
    T: TaskRepository + ?Sized,
    M: MemberRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            members: Arc::clone(&self.members),
        }
    }
}

impl<T, M> BoardStatisticsService<T, M>
where
    T: TaskRepository + ?Sized,
    M: MemberRepository + ?Sized,
{
    /// Creates a statistics service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, members: Arc<M>) -> Self {
        Self { tasks, members }
    }

    /// Computes statistics for one project, or for every task when `project`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStatisticsError`] when a store lookup fails.
    pub async fn compute(
        &self,
        project: Option<ProjectId>,
    ) -> Result<BoardStatistics, BoardStatisticsError> {
        let filter = project.map_or_else(TaskFilter::new, |id| TaskFilter::new().with_project(id));
        let tasks = self.tasks.list(&filter).await?;

        let mut names: HashMap<MemberId, String> = HashMap::new();
        for member_id in tasks.iter().filter_map(Task::assignee_id) {
            if names.contains_key(&member_id) {
                continue;
            }
            let name = self.members.find_by_id(member_id).await?.map_or_else(
                || UNKNOWN_MEMBER_LABEL.to_owned(),
                |member| member.name().as_str().to_owned(),
            );
            names.insert(member_id, name);
        }

        Ok(BoardStatistics::tally(&tasks, |assignee| {
            assignee.map_or_else(
                || UNASSIGNED_LABEL.to_owned(),
                |id| {
                    names
                        .get(&id)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_MEMBER_LABEL.to_owned())
                },
            )
        }))
    }
}
