//! CSV export and import of tasks through the workflow engine.

use super::workflow::{CreateTaskRequest, TaskWorkflowError, TaskWorkflowService};
use crate::error::ErrorKind;
use crate::history::ports::HistoryRepository;
use crate::member::{
    domain::MemberId,
    ports::{MemberRepository, MemberRepositoryError},
};
use crate::project::domain::ProjectId;
use crate::task::{
    adapters::csv::{self, CsvError, ExportRow, ImportedRow},
    domain::{Task, TaskFilter},
    ports::TaskRepository,
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Tasks created, in document order.
    pub created: Vec<Task>,
    /// Rows whose creation failed.
    pub failed: usize,
}

/// Errors raised by CSV interchange.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The document could not be decoded.
    #[error(transparent)]
    Csv(#[from] CsvError),
    /// Listing tasks failed.
    #[error(transparent)]
    Workflow(#[from] TaskWorkflowError),
    /// Resolving assignee names failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),
}

impl InterchangeError {
    /// Classifies the error for inbound transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Csv(_) => ErrorKind::Validation,
            Self::Workflow(err) => err.kind(),
            Self::Members(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for CSV interchange operations.
pub type InterchangeResult<T> = Result<T, InterchangeError>;

/// Exports and imports tasks as CSV.
pub struct CsvInterchangeService<T, H, M, C>
where
    T: TaskRepository + ?Sized,
    H: HistoryRepository + ?Sized,
    M: MemberRepository + ?Sized,
    C: Clock + Send + Sync,
{
    workflow: TaskWorkflowService<T, H, C>,
    members: Arc<M>,
}

impl<T, H, M, C> Clone for CsvInterchangeService<T, H, M, C>
where
    T: TaskRepository + ?Sized,
    H: HistoryRepository + ?Sized,
    M: MemberRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            workflow: self.workflow.clone(),
            members: Arc::clone(&self.members),
        }
    }
}

impl<T, H, M, C> CsvInterchangeService<T, H, M, C>
where
    T: TaskRepository + ?Sized,
    H: HistoryRepository + ?Sized,
    M: MemberRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates an interchange service on top of a workflow service.
    #[must_use]
    pub const fn new(workflow: TaskWorkflowService<T, H, C>, members: Arc<M>) -> Self {
        Self { workflow, members }
    }

    /// Exports the tasks of one project, or every task when `project` is
    /// `None`, newest first.
    ///
    /// Assignees are written by name, or by raw identifier when the member no
    /// longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError`] when a store lookup fails.
    pub async fn export(&self, project: Option<ProjectId>) -> InterchangeResult<String> {
        let filter = project.map_or_else(TaskFilter::new, |id| TaskFilter::new().with_project(id));
        let tasks = self.workflow.list(&filter).await?;

        let mut labels: HashMap<MemberId, String> = HashMap::new();
        for member_id in tasks.iter().filter_map(Task::assignee_id) {
            if labels.contains_key(&member_id) {
                continue;
            }
            let label = self.members.find_by_id(member_id).await?.map_or_else(
                || member_id.to_string(),
                |member| member.name().as_str().to_owned(),
            );
            labels.insert(member_id, label);
        }

        let rows: Vec<ExportRow<'_>> = tasks
            .iter()
            .map(|task| ExportRow {
                task,
                assignee: task
                    .assignee_id()
                    .and_then(|id| labels.get(&id))
                    .map_or("", String::as_str),
            })
            .collect();
        debug!(count = rows.len(), "tasks exported");
        Ok(csv::encode_document(&rows))
    }

    /// Imports a CSV document, creating one task per data row in `project`.
    ///
    /// Rows go through the normal create path, so each success records a
    /// `create` history entry. A failing row is counted and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`InterchangeError::Csv`] when the document has no data row.
    pub async fn import(
        &self,
        document: &str,
        project: Option<ProjectId>,
    ) -> InterchangeResult<ImportReport> {
        let rows = csv::decode_document(document)?;
        let mut report = ImportReport {
            created: Vec::with_capacity(rows.len()),
            failed: 0,
        };

        for row in rows {
            match self.workflow.create(to_request(row, project)).await {
                Ok(task) => report.created.push(task),
                Err(err) => {
                    warn!(error = %err, "failed to import task row");
                    report.failed = report.failed.saturating_add(1);
                }
            }
        }
        debug!(
            created = report.created.len(),
            failed = report.failed,
            "csv import finished"
        );
        Ok(report)
    }
}

fn to_request(row: ImportedRow, project: Option<ProjectId>) -> CreateTaskRequest {
    let ImportedRow {
        title,
        description,
        status,
        priority,
        tags,
    } = row;

    let request = CreateTaskRequest::new(title)
        .with_description(description)
        .with_status(status.as_str())
        .with_priority(priority.as_str())
        .with_tags(tags.into_inner());
    match project {
        Some(id) => request.with_project(id),
        None => request,
    }
}
