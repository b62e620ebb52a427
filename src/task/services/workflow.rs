//! Task workflow orchestration: lifecycle, advance state machine and
//! assignment, with audit entries for each recognised mutation.

use super::admission::{AdmissionController, MAX_IN_PROGRESS_PER_MEMBER};
use crate::error::ErrorKind;
use crate::history::{
    domain::{HistoryAction, HistoryEntry},
    ports::HistoryRepository,
    services::{AuditTrailRecorder, AuditTrailResult},
};
use crate::member::domain::{MemberDomainError, MemberId};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        AssigneeChange, Task, TaskChanges, TaskDomainError, TaskDraft, TaskFilter, TaskId,
        TaskPriority, TaskStatus, TaskTags, TaskTitle, describe_changes,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Request payload for creating a task.
///
/// Status and priority arrive as text and are validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee: Option<String>,
    tags: Vec<String>,
    project_id: Option<ProjectId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            assignee: None,
            tags: Vec::new(),
            project_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status. Defaults to `todo`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the priority. Defaults to `medium`.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the assignee identifier. Blank text leaves the task unassigned.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Scopes the task to a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    fn into_draft(self) -> TaskWorkflowResult<TaskDraft> {
        let Self {
            title,
            description,
            status,
            priority,
            assignee,
            tags,
            project_id,
        } = self;

        let mut draft = TaskDraft::new(TaskTitle::new(title)?).with_tags(TaskTags::new(tags));
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        if let Some(raw_status) = status {
            draft = draft.with_status(parse_status(&raw_status)?);
        }
        if let Some(raw_priority) = priority {
            draft = draft.with_priority(parse_priority(&raw_priority)?);
        }
        if let Some(member_id) = parse_optional_assignee(assignee.as_deref())? {
            draft = draft.with_assignee(member_id);
        }
        if let Some(project) = project_id {
            draft = draft.with_project(project);
        }
        Ok(draft)
    }
}

/// Request payload for a partial task update. Unset fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee: Option<String>,
    tags: Option<Vec<String>>,
    project_id: Option<ProjectId>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Writes a status directly. Any of the four statuses is accepted.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the assignee. Blank text clears it.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub fn clear_assignee(mut self) -> Self {
        self.assignee = Some(String::new());
        self
    }

    /// Replaces the tags wholesale.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Moves the task to another project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    fn into_changes(self, updated_at: DateTime<Utc>) -> TaskWorkflowResult<TaskChanges> {
        let Self {
            title,
            description,
            status,
            priority,
            assignee,
            tags,
            project_id,
        } = self;

        let mut changes = TaskChanges::new(updated_at);
        if let Some(text) = title {
            changes = changes.with_title(TaskTitle::new(text)?);
        }
        if let Some(text) = description {
            changes = changes.with_description(text);
        }
        if let Some(raw_status) = status {
            changes = changes.with_status(parse_status(&raw_status)?);
        }
        if let Some(raw_priority) = priority {
            changes = changes.with_priority(parse_priority(&raw_priority)?);
        }
        if let Some(raw_assignee) = assignee {
            let change = parse_optional_assignee(Some(raw_assignee.as_str()))?
                .map_or(AssigneeChange::Clear, AssigneeChange::Set);
            changes = changes.with_assignee(change);
        }
        if let Some(labels) = tags {
            changes = changes.with_tags(TaskTags::new(labels));
        }
        if let Some(project) = project_id {
            changes = changes.with_project(project);
        }
        Ok(changes)
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Task field validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The assignee reference is blank or malformed.
    #[error(transparent)]
    InvalidAssignee(#[from] MemberDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The member already holds the maximum number of in-progress tasks.
    #[error("member {member_id} already has {limit} in-progress tasks")]
    CapacityExceeded {
        /// Member refused by admission control.
        member_id: MemberId,
        /// Admission limit in force.
        limit: u64,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskWorkflowError {
    /// Classifies the error for inbound transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidAssignee(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::Repository(_) => ErrorKind::Storage,
        }
    }

    fn from_repository(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
pub struct TaskWorkflowService<T, H, C>
where
    T: TaskRepository + ?Sized,
    H: HistoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    admission: AdmissionController<T>,
    audit: AuditTrailRecorder<H, C>,
    clock: Arc<C>,
}

impl<T, H, C> Clone for TaskWorkflowService<T, H, C>
where
    T: TaskRepository + ?Sized,
    H: HistoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            admission: self.admission.clone(),
            audit: self.audit.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, H, C> TaskWorkflowService<T, H, C>
where
    T: TaskRepository + ?Sized,
    H: HistoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a workflow service over the task and history stores.
    #[must_use]
    pub fn new(tasks: Arc<T>, history: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            admission: AdmissionController::new(Arc::clone(&tasks)),
            audit: AuditTrailRecorder::new(history, Arc::clone(&clock)),
            tasks,
            clock,
        }
    }

    /// Returns the admission controller used by advance and assign.
    #[must_use]
    pub const fn admission(&self) -> &AdmissionController<T> {
        &self.admission
    }

    /// Creates and stores a task, then records a `create` entry.
    ///
    /// No admission check runs, even when the task starts `in_progress`
    /// with an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] for a blank title or unknown
    /// status or priority, [`TaskWorkflowError::InvalidAssignee`] for a
    /// malformed assignee, or [`TaskWorkflowError::Repository`] when
    /// persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskWorkflowResult<Task> {
        let task = Task::new(request.into_draft()?, &*self.clock);
        self.tasks.store(&task).await?;
        debug!(task_id = %task.id(), status = %task.status(), "task created");

        self.audit
            .record(
                task.id(),
                HistoryAction::Create,
                format!("Task created: {}", task.title()),
            )
            .await;
        Ok(task)
    }

    /// Fetches a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task does not exist or
    /// [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))
    }

    /// Lists tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the query fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list(filter).await?)
    }

    /// Applies a partial update and records one `update` entry describing
    /// the tracked fields that changed.
    ///
    /// No admission check runs: a status or assignee written here may take a
    /// member past the in-progress limit. When the current task cannot be
    /// read beforehand the update still proceeds, without an audit entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] or
    /// [`TaskWorkflowError::InvalidAssignee`] for invalid fields,
    /// [`TaskWorkflowError::NotFound`] when the task does not exist, or
    /// [`TaskWorkflowError::Repository`] when persistence fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskWorkflowResult<Task> {
        let changes = request.into_changes(self.clock.utc())?;

        let previous = match self.tasks.find_by_id(id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(task_id = %id, error = %err, "could not read task before update");
                None
            }
        };

        let updated = self
            .tasks
            .update_fields(id, &changes)
            .await
            .map_err(TaskWorkflowError::from_repository)?;
        debug!(task_id = %id, "task updated");

        if let Some(before) = previous {
            let descriptions = describe_changes(&before, &updated);
            if !descriptions.is_empty() {
                self.audit
                    .record(id, HistoryAction::Update, descriptions.join(", "))
                    .await;
            }
        }
        Ok(updated)
    }

    /// Removes a task. Removing an unknown task is not an error.
    ///
    /// History entries for the task are kept and no entry is added.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskWorkflowResult<()> {
        let removed = self.tasks.delete(id).await?;
        debug!(task_id = %id, removed, "task delete processed");
        Ok(())
    }

    /// Moves a task one step along `todo → in_progress → done`.
    ///
    /// `done` and `blocked` tasks are returned unchanged without an audit
    /// entry. Moving an assigned task into `in_progress` requires admission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task does not exist,
    /// [`TaskWorkflowError::CapacityExceeded`] when the assignee is at the
    /// limit, or [`TaskWorkflowError::Repository`] when persistence fails.
    pub async fn advance(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        let mut task = self.get(id).await?;

        let Some(next) = task.status().next_in_advance() else {
            debug!(task_id = %id, status = %task.status(), "task has no successor status");
            return Ok(task);
        };
        if let (TaskStatus::InProgress, Some(assignee)) = (next, task.assignee_id()) {
            self.ensure_capacity(assignee).await?;
        }

        let Some(previous) = task.advance(&*self.clock) else {
            return Ok(task);
        };
        self.tasks
            .update(&task)
            .await
            .map_err(TaskWorkflowError::from_repository)?;
        debug!(task_id = %id, from = %previous, to = %task.status(), "task advanced");

        self.audit
            .record(
                id,
                HistoryAction::StatusChange,
                format!("Status advanced from {previous} to {}", task.status()),
            )
            .await;
        Ok(task)
    }

    /// Assigns a task to a member after an admission check.
    ///
    /// Admission runs before the task lookup, so a full member is refused
    /// even for an unknown task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::InvalidAssignee`] for a blank or malformed
    /// assignee, [`TaskWorkflowError::CapacityExceeded`] when the member is at
    /// the limit, [`TaskWorkflowError::NotFound`] when the task does not
    /// exist, or [`TaskWorkflowError::Repository`] when persistence fails.
    pub async fn assign(&self, id: TaskId, assignee: &str) -> TaskWorkflowResult<Task> {
        let member_id = MemberId::parse(assignee)?;
        self.ensure_capacity(member_id).await?;

        let mut task = self.get(id).await?;
        task.assign_to(member_id, &*self.clock);
        self.tasks
            .update(&task)
            .await
            .map_err(TaskWorkflowError::from_repository)?;
        debug!(task_id = %id, %member_id, "task assigned");

        self.audit
            .record(id, HistoryAction::Update, "Task assigned to member")
            .await;
        Ok(task)
    }

    /// Returns the audit trail for a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns the recorder's error when history lookup fails.
    pub async fn history(&self, id: TaskId) -> AuditTrailResult<Vec<HistoryEntry>> {
        self.audit.list_for_task(id).await
    }

    async fn ensure_capacity(&self, member_id: MemberId) -> TaskWorkflowResult<()> {
        if self.admission.can_assign(Some(member_id)).await? {
            return Ok(());
        }
        debug!(%member_id, "admission refused");
        Err(TaskWorkflowError::CapacityExceeded {
            member_id,
            limit: MAX_IN_PROGRESS_PER_MEMBER,
        })
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, TaskDomainError> {
    Ok(TaskStatus::try_from(raw)?)
}

fn parse_priority(raw: &str) -> Result<TaskPriority, TaskDomainError> {
    Ok(TaskPriority::try_from(raw)?)
}

/// Blank text means "no assignee".
fn parse_optional_assignee(raw: Option<&str>) -> Result<Option<MemberId>, MemberDomainError> {
    match raw {
        Some(text) if !text.trim().is_empty() => MemberId::parse(text).map(Some),
        _ => Ok(None),
    }
}
