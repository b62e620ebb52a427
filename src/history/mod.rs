//! Audit trail for task workflow mutations.
//!
//! History entries are append-only records describing what changed on a task
//! and when. They reference tasks by identifier only and outlive the task
//! they describe: deleting a task never removes its history. Recording is
//! best-effort, so a task mutation may succeed without its entry. The module
//! follows hexagonal architecture:
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
