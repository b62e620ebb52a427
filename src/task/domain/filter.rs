//! Conjunctive task query filter.

use super::{Task, TaskPriority, TaskStatus};
use crate::member::domain::MemberId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Filter applied when listing tasks. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    assignee_id: Option<MemberId>,
    tag: Option<String>,
    priority: Option<TaskPriority>,
    project_id: Option<ProjectId>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Restricts to tasks carrying the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Restricts to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to one project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Keeps tasks created on or after the start of `date` (UTC).
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Keeps tasks created on or before the last millisecond of `date` (UTC).
    #[must_use]
    pub const fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Returns the status criterion.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the assignee criterion.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<MemberId> {
        self.assignee_id
    }

    /// Returns the tag criterion.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the priority criterion.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the project criterion.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the inclusive lower creation bound.
    #[must_use]
    pub fn created_from(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Returns the inclusive upper creation bound: `23:59:59.999` on the end
    /// date.
    #[must_use]
    pub fn created_until(&self) -> Option<DateTime<Utc>> {
        let last_millisecond = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
        self.end_date
            .map(|date| date.and_time(last_millisecond).and_utc())
    }

    /// Returns whether the task satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .assignee_id
                .is_none_or(|assignee| task.assignee_id() == Some(assignee))
            && self
                .tag
                .as_deref()
                .is_none_or(|tag| task.tags().contains(tag))
            && self
                .priority
                .is_none_or(|priority| task.priority() == priority)
            && self
                .project_id
                .is_none_or(|project| task.project_id() == Some(project))
            && self
                .created_from()
                .is_none_or(|from| task.created_at() >= from)
            && self
                .created_until()
                .is_none_or(|until| task.created_at() <= until)
    }
}

