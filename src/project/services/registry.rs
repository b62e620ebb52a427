//! Service layer for project registration and lookup.
//!
//! Provides [`ProjectRegistryService`] which enforces the case-insensitive
//! key uniqueness rule before persisting new projects.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectKey, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    key: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name and key.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for project registry operations.
#[derive(Debug, Error)]
pub enum ProjectRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

impl ProjectRegistryError {
    /// Classifies the error for inbound transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(
                ProjectRepositoryError::DuplicateKey(_) | ProjectRepositoryError::DuplicateProject(_),
            ) => ErrorKind::DuplicateKey,
            Self::Repository(ProjectRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for project registry service operations.
pub type ProjectRegistryResult<T> = Result<T, ProjectRegistryError>;

/// Project registration and lookup orchestration service.
pub struct ProjectRegistryService<R, C>
where
    R: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ProjectRegistryService<R, C>
where
    R: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ProjectRegistryService<R, C>
where
    R: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new project registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new project.
    ///
    /// The key is upper-cased before the uniqueness check, so `web` and `WEB`
    /// collide.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Domain`] when the name or key is blank
    /// and [`ProjectRegistryError::Repository`] with
    /// [`ProjectRepositoryError::DuplicateKey`] when the key is taken.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectRegistryResult<Project> {
        let CreateProjectRequest {
            name,
            key,
            description,
        } = request;

        let project_name = ProjectName::new(name)?;
        let project_key = ProjectKey::new(key)?;

        // The store enforces the same rule; this lookup reports it before
        // attempting the insert.
        if self.repository.find_by_key(&project_key).await?.is_some() {
            return Err(ProjectRepositoryError::DuplicateKey(project_key).into());
        }

        let mut project = Project::new(project_name, project_key, &*self.clock);
        if let Some(text) = description {
            project = project.with_description(text);
        }
        self.repository.store(&project).await?;
        debug!(project_id = %project.id(), key = %project.key(), "project created");
        Ok(project)
    }

    /// Returns all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> ProjectRegistryResult<Vec<Project>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns the project with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] with
    /// [`ProjectRepositoryError::NotFound`] when the project does not exist.
    pub async fn get(&self, id: ProjectId) -> ProjectRegistryResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(id).into())
    }

    /// Finds a project by key, compared case-insensitively.
    ///
    /// Returns `Ok(None)` when no project holds the key.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Domain`] when the key is blank, or
    /// [`ProjectRegistryError::Repository`] when persistence lookup fails.
    pub async fn find_by_key(&self, key: &str) -> ProjectRegistryResult<Option<Project>> {
        let project_key = ProjectKey::new(key)?;
        Ok(self.repository.find_by_key(&project_key).await?)
    }
}
