//! Domain model for the project registry.

mod error;
mod ids;
mod key;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use key::ProjectKey;
pub use project::{PersistedProjectData, Project, ProjectName};
