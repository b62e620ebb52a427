//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project key is empty after trimming.
    #[error("project key must not be empty")]
    EmptyProjectKey,

    /// The project identifier is not a valid UUID.
    #[error("invalid project identifier: {0}")]
    InvalidProjectId(String),
}
