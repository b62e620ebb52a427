//! Facade wiring every service over one store.
//!
//! The facade is the inbound operation surface: task lifecycle, member and
//! project management, history lookup, statistics and CSV interchange.
//! Repositories are held as trait objects so the store can be chosen from
//! configuration at run time.

use crate::config::{StoreConfig, TrackerConfig};
use crate::history::{
    adapters::{memory::InMemoryHistoryRepository, postgres::PostgresHistoryRepository},
    domain::HistoryEntry,
    ports::HistoryRepository,
    services::AuditTrailResult,
};
use crate::member::{
    adapters::{memory::InMemoryMemberRepository, postgres::PostgresMemberRepository},
    domain::{Member, MemberId},
    ports::MemberRepository,
    services::{CreateMemberRequest, MemberDirectoryResult, MemberDirectoryService},
};
use crate::postgres::{PgPool, build_pool};
use crate::project::{
    adapters::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
    domain::{Project, ProjectId},
    ports::ProjectRepository,
    services::{CreateProjectRequest, ProjectRegistryResult, ProjectRegistryService},
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    domain::{Task, TaskFilter, TaskId},
    ports::TaskRepository,
    services::{
        BoardStatistics, BoardStatisticsError, BoardStatisticsService, CreateTaskRequest,
        CsvInterchangeService, ImportReport, InterchangeResult, TaskWorkflowResult,
        TaskWorkflowService, UpdateTaskRequest,
    },
};
use diesel::r2d2::PoolError;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// The repositories a tracker runs over.
#[derive(Clone)]
pub struct TrackerStores {
    /// Task store.
    pub tasks: Arc<dyn TaskRepository>,
    /// History store.
    pub history: Arc<dyn HistoryRepository>,
    /// Member store.
    pub members: Arc<dyn MemberRepository>,
    /// Project store.
    pub projects: Arc<dyn ProjectRepository>,
}

impl TrackerStores {
    /// Fresh process-local stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            history: Arc::new(InMemoryHistoryRepository::new()),
            members: Arc::new(InMemoryMemberRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
        }
    }

    /// `PostgreSQL` stores sharing one connection pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            history: Arc::new(PostgresHistoryRepository::new(pool.clone())),
            members: Arc::new(PostgresMemberRepository::new(pool.clone())),
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        }
    }
}

/// Errors raised while building a tracker from configuration.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The connection pool could not be built.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// Task tracker facade.
pub struct Tracker<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    workflow: TaskWorkflowService<dyn TaskRepository, dyn HistoryRepository, C>,
    members: MemberDirectoryService<dyn MemberRepository, C>,
    projects: ProjectRegistryService<dyn ProjectRepository, C>,
    statistics: BoardStatisticsService<dyn TaskRepository, dyn MemberRepository>,
    interchange:
        CsvInterchangeService<dyn TaskRepository, dyn HistoryRepository, dyn MemberRepository, C>,
}

impl<C> Clone for Tracker<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            workflow: self.workflow.clone(),
            members: self.members.clone(),
            projects: self.projects.clone(),
            statistics: self.statistics.clone(),
            interchange: self.interchange.clone(),
        }
    }
}

impl Tracker<DefaultClock> {
    /// Builds a tracker over fresh in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(TrackerStores::in_memory(), Arc::new(DefaultClock))
    }

    /// Builds a tracker over the store the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Pool`] when the `PostgreSQL` pool cannot be
    /// built.
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let stores = match config.store() {
            StoreConfig::InMemory => {
                info!(store = "memory", "tracker starting");
                TrackerStores::in_memory()
            }
            StoreConfig::Postgres {
                database_url,
                pool_size,
            } => {
                let pool = build_pool(database_url, *pool_size)?;
                info!(store = "postgres", pool_size, "tracker starting");
                TrackerStores::postgres(&pool)
            }
        };
        Ok(Self::new(stores, Arc::new(DefaultClock)))
    }
}

impl<C> Tracker<C>
where
    C: Clock + Send + Sync,
{
    /// Builds a tracker over explicit stores and clock.
    #[must_use]
    pub fn new(stores: TrackerStores, clock: Arc<C>) -> Self {
        let TrackerStores {
            tasks,
            history,
            members,
            projects,
        } = stores;

        let workflow = TaskWorkflowService::new(Arc::clone(&tasks), history, Arc::clone(&clock));
        Self {
            interchange: CsvInterchangeService::new(workflow.clone(), Arc::clone(&members)),
            statistics: BoardStatisticsService::new(tasks, Arc::clone(&members)),
            members: MemberDirectoryService::new(members, Arc::clone(&clock)),
            projects: ProjectRegistryService::new(projects, clock),
            workflow,
        }
    }

    /// Returns the task workflow service.
    #[must_use]
    pub const fn workflow(&self) -> &TaskWorkflowService<dyn TaskRepository, dyn HistoryRepository, C> {
        &self.workflow
    }

    /// Returns the member directory service.
    #[must_use]
    pub const fn members(&self) -> &MemberDirectoryService<dyn MemberRepository, C> {
        &self.members
    }

    /// Returns the project registry service.
    #[must_use]
    pub const fn projects(&self) -> &ProjectRegistryService<dyn ProjectRepository, C> {
        &self.projects
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::create`].
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskWorkflowResult<Task> {
        self.workflow.create(request).await
    }

    /// Lists tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::list`].
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TaskWorkflowResult<Vec<Task>> {
        self.workflow.list(filter).await
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::get`].
    pub async fn get_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.workflow.get(id).await
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::update`].
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        self.workflow.update(id, request).await
    }

    /// Deletes a task, keeping its history.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::delete`].
    pub async fn delete_task(&self, id: TaskId) -> TaskWorkflowResult<()> {
        self.workflow.delete(id).await
    }

    /// Advances a task one status.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::advance`].
    pub async fn advance_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.workflow.advance(id).await
    }

    /// Assigns a task to a member.
    ///
    /// # Errors
    ///
    /// See [`TaskWorkflowService::assign`].
    pub async fn assign_task(&self, id: TaskId, assignee: &str) -> TaskWorkflowResult<Task> {
        self.workflow.assign(id, assignee).await
    }

    /// Lists a task's history, newest first.
    ///
    /// # Errors
    ///
    /// Returns the recorder's error when lookup fails.
    pub async fn task_history(&self, id: TaskId) -> AuditTrailResult<Vec<HistoryEntry>> {
        self.workflow.history(id).await
    }

    /// Creates a member.
    ///
    /// # Errors
    ///
    /// See [`MemberDirectoryService::create`].
    pub async fn create_member(&self, request: CreateMemberRequest) -> MemberDirectoryResult<Member> {
        self.members.create(request).await
    }

    /// Lists members by name.
    ///
    /// # Errors
    ///
    /// See [`MemberDirectoryService::list`].
    pub async fn list_members(&self) -> MemberDirectoryResult<Vec<Member>> {
        self.members.list().await
    }

    /// Deletes a member. Tasks keep their assignee reference.
    ///
    /// # Errors
    ///
    /// See [`MemberDirectoryService::delete`].
    pub async fn delete_member(&self, id: MemberId) -> MemberDirectoryResult<()> {
        self.members.delete(id).await
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// See [`ProjectRegistryService::create`].
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectRegistryResult<Project> {
        self.projects.create(request).await
    }

    /// Lists projects, newest first.
    ///
    /// # Errors
    ///
    /// See [`ProjectRegistryService::list`].
    pub async fn list_projects(&self) -> ProjectRegistryResult<Vec<Project>> {
        self.projects.list().await
    }

    /// Fetches one project.
    ///
    /// # Errors
    ///
    /// See [`ProjectRegistryService::get`].
    pub async fn get_project(&self, id: ProjectId) -> ProjectRegistryResult<Project> {
        self.projects.get(id).await
    }

    /// Computes board statistics for a project, or for every task.
    ///
    /// # Errors
    ///
    /// See [`BoardStatisticsService::compute`].
    pub async fn board_statistics(
        &self,
        project: Option<ProjectId>,
    ) -> Result<BoardStatistics, BoardStatisticsError> {
        self.statistics.compute(project).await
    }

    /// Exports tasks as CSV.
    ///
    /// # Errors
    ///
    /// See [`CsvInterchangeService::export`].
    pub async fn export_csv(&self, project: Option<ProjectId>) -> InterchangeResult<String> {
        self.interchange.export(project).await
    }

    /// Imports tasks from CSV into a project.
    ///
    /// # Errors
    ///
    /// See [`CsvInterchangeService::import`].
    pub async fn import_csv(
        &self,
        document: &str,
        project: Option<ProjectId>,
    ) -> InterchangeResult<ImportReport> {
        self.interchange.import(document, project).await
    }
}
