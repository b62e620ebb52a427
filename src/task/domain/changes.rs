//! Partial task updates and the audit description of their effect.

use super::{Task, TaskPriority, TaskStatus, TaskTags, TaskTitle};
use crate::member::domain::MemberId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};

/// How an update treats the assignee reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssigneeChange {
    /// Leave the current assignee as is.
    #[default]
    Keep,
    /// Replace the assignee.
    Set(MemberId),
    /// Remove the assignee.
    Clear,
}

impl AssigneeChange {
    /// Returns the assignee after applying this change to `current`.
    #[must_use]
    pub const fn resolve(self, current: Option<MemberId>) -> Option<MemberId> {
        match self {
            Self::Keep => current,
            Self::Set(member_id) => Some(member_id),
            Self::Clear => None,
        }
    }
}

/// Validated set of field changes for one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<TaskTitle>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee: AssigneeChange,
    tags: Option<TaskTags>,
    project_id: Option<ProjectId>,
    updated_at: DateTime<Utc>,
}

impl TaskChanges {
    /// Creates an empty change set stamped with the mutation time.
    #[must_use]
    pub fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            assignee: AssigneeChange::Keep,
            tags: None,
            project_id: None,
            updated_at,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Writes a status directly, bypassing the advance sequence.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets how the assignee changes.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: AssigneeChange) -> Self {
        self.assignee = assignee;
        self
    }

    /// Replaces the tags wholesale.
    #[must_use]
    pub fn with_tags(mut self, tags: TaskTags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Moves the task to another project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the replacement priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the assignee change.
    #[must_use]
    pub const fn assignee(&self) -> AssigneeChange {
        self.assignee
    }

    /// Returns the replacement tags, if any.
    #[must_use]
    pub const fn tags(&self) -> Option<&TaskTags> {
        self.tags.as_ref()
    }

    /// Returns the replacement project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Describes the audited differences between two versions of a task.
///
/// Only status, priority, assignee and title are tracked, in that order.
/// Description, tag and project edits produce no description.
#[must_use]
pub fn describe_changes(previous: &Task, current: &Task) -> Vec<String> {
    let mut descriptions = Vec::new();
    if previous.status() != current.status() {
        descriptions.push(format!(
            "Status changed from {} to {}",
            previous.status(),
            current.status()
        ));
    }
    if previous.priority() != current.priority() {
        descriptions.push(format!(
            "Priority changed from {} to {}",
            previous.priority(),
            current.priority()
        ));
    }
    if previous.assignee_id() != current.assignee_id() {
        descriptions.push("Assignee changed".to_owned());
    }
    if previous.title() != current.title() {
        descriptions.push("Title updated".to_owned());
    }
    descriptions
}
