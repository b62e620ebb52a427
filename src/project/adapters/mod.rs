//! Adapter implementations for the project registry ports.

pub mod memory;
pub mod postgres;
