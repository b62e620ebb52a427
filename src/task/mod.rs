//! Task workflow engine.
//!
//! This module owns the task lifecycle: creation, filtered listing, partial
//! updates, deletion, the `todo → in_progress → done` advance state machine and
//! assignment. Advance and assign consult the admission controller, which caps
//! each member at five in-progress tasks. Every recognised mutation is
//! described to the audit trail in [`crate::history`]. Board statistics and
//! CSV interchange are built on top of the workflow service. The module
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
