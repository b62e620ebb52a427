//! Project registry for Taskboard.
//!
//! Projects namespace tasks by a short key. Keys are stored upper-cased and
//! must be unique across all projects regardless of the case they were
//! supplied in. The workflow engine references projects only as a scoping
//! attribute on tasks. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
