//! Adapter implementations for the audit trail ports.

pub mod memory;
pub mod postgres;
