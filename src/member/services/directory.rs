//! Service layer for member creation, listing, lookup and removal.

use crate::error::ErrorKind;
use crate::member::{
    domain::{Member, MemberDomainError, MemberId, MemberName, UNASSIGNED_LABEL, UNKNOWN_MEMBER_LABEL},
    ports::{MemberRepository, MemberRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMemberRequest {
    name: String,
    role: Option<String>,
    email: Option<String>,
}

impl CreateMemberRequest {
    /// Creates a request with the required member name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            email: None,
        }
    }

    /// Sets the member role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the member e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Service-level errors for member directory operations.
#[derive(Debug, Error)]
pub enum MemberDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MemberDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MemberRepositoryError),
}

impl MemberDirectoryError {
    /// Classifies the error for inbound transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(MemberRepositoryError::DuplicateMember(_)) => ErrorKind::DuplicateKey,
            Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for member directory service operations.
pub type MemberDirectoryResult<T> = Result<T, MemberDirectoryError>;

/// Member directory orchestration service.
pub struct MemberDirectoryService<R, C>
where
    R: MemberRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for MemberDirectoryService<R, C>
where
    R: MemberRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> MemberDirectoryService<R, C>
where
    R: MemberRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new member directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDirectoryError::Domain`] when the name is blank, or
    /// [`MemberDirectoryError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateMemberRequest) -> MemberDirectoryResult<Member> {
        let CreateMemberRequest { name, role, email } = request;
        let mut member = Member::new(MemberName::new(name)?, &*self.clock);
        if let Some(member_role) = role {
            member = member.with_role(member_role);
        }
        if let Some(member_email) = email {
            member = member.with_email(member_email);
        }
        self.repository.store(&member).await?;
        debug!(member_id = %member.id(), "member created");
        Ok(member)
    }

    /// Returns all members ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> MemberDirectoryResult<Vec<Member>> {
        Ok(self.repository.list_all().await?)
    }

    /// Finds a member by identifier.
    ///
    /// Returns `Ok(None)` when the member does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn get(&self, id: MemberId) -> MemberDirectoryResult<Option<Member>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Removes a member. Removing an unknown member is not an error.
    ///
    /// Tasks assigned to the member keep their assignee reference.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDirectoryError::Repository`] when persistence fails.
    pub async fn delete(&self, id: MemberId) -> MemberDirectoryResult<()> {
        let removed = self.repository.delete(id).await?;
        debug!(member_id = %id, removed, "member delete processed");
        Ok(())
    }

    /// Resolves an assignee reference to a display name.
    ///
    /// Absent references resolve to [`UNASSIGNED_LABEL`] and references to
    /// deleted members resolve to [`UNKNOWN_MEMBER_LABEL`].
    ///
    /// # Errors
    ///
    /// Returns [`MemberDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn display_name(&self, id: Option<MemberId>) -> MemberDirectoryResult<String> {
        let Some(member_id) = id else {
            return Ok(UNASSIGNED_LABEL.to_owned());
        };
        let member = self.repository.find_by_id(member_id).await?;
        Ok(member.map_or_else(
            || UNKNOWN_MEMBER_LABEL.to_owned(),
            |found| found.name().as_str().to_owned(),
        ))
    }
}
