//! Application services for the project registry.

mod registry;

pub use registry::{
    CreateProjectRequest, ProjectRegistryError, ProjectRegistryResult, ProjectRegistryService,
};
