//! Member directory for Taskboard.
//!
//! Members are the people tasks can be assigned to. The directory enforces
//! no uniqueness on names or e-mail addresses and never cascades deletes:
//! tasks keep whatever assignee identifier they held, and display code
//! resolves a missing member to a fallback label. The module follows
//! hexagonal architecture:
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
