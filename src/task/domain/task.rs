//! Task aggregate root.

use super::{TaskChanges, TaskId, TaskPriority, TaskStatus, TaskTags, TaskTitle};
use crate::member::domain::MemberId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Field values for a task that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<MemberId>,
    tags: TaskTags,
    project_id: Option<ProjectId>,
}

impl TaskDraft {
    /// Creates a draft with default status and priority.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee_id: None,
            tags: TaskTags::default(),
            project_id: None,
        }
    }

    /// Sets the description. Blank text leaves it unset.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: TaskTags) -> Self {
        self.tags = tags;
        self
    }

    /// Scopes the task to a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<MemberId>,
    tags: TaskTags,
    project_id: Option<ProjectId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee reference, if any.
    pub assignee_id: Option<MemberId>,
    /// Persisted tags.
    pub tags: TaskTags,
    /// Persisted project reference, if any.
    pub project_id: Option<ProjectId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let TaskDraft {
            title,
            description,
            status,
            priority,
            assignee_id,
            tags,
            project_id,
        } = draft;

        Self {
            id: TaskId::new(),
            title,
            description,
            status,
            priority,
            assignee_id,
            tags,
            project_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            tags: data.tags,
            project_id: data.project_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<MemberId> {
        self.assignee_id
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &TaskTags {
        &self.tags
    }

    /// Returns the project reference, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial field change set.
    ///
    /// No transition rule is enforced: any status may be written directly.
    pub fn apply_changes(&mut self, changes: &TaskChanges) {
        if let Some(title) = changes.title() {
            self.title = title.clone();
        }
        if let Some(description) = changes.description() {
            self.description = normalize_description(description.to_owned());
        }
        if let Some(status) = changes.status() {
            self.status = status;
        }
        if let Some(priority) = changes.priority() {
            self.priority = priority;
        }
        self.assignee_id = changes.assignee().resolve(self.assignee_id);
        if let Some(tags) = changes.tags() {
            self.tags = tags.clone();
        }
        if let Some(project_id) = changes.project_id() {
            self.project_id = Some(project_id);
        }
        self.updated_at = changes.updated_at();
    }

    /// Moves the task one step along `todo → in_progress → done`.
    ///
    /// Returns the previous status, or `None` when the task is `done` or
    /// `blocked` and was left untouched.
    pub fn advance(&mut self, clock: &impl Clock) -> Option<TaskStatus> {
        let previous = self.status;
        let next = previous.next_in_advance()?;
        self.status = next;
        self.touch(clock);
        Some(previous)
    }

    /// Assigns the task to a member.
    pub fn assign_to(&mut self, assignee_id: MemberId, clock: &impl Clock) {
        self.assignee_id = Some(assignee_id);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

pub(super) fn normalize_description(description: String) -> Option<String> {
    if description.trim().is_empty() {
        None
    } else {
        Some(description)
    }
}
