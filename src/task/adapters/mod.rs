//! Adapter implementations for the task workflow ports.

pub mod csv;
pub mod memory;
pub mod postgres;
