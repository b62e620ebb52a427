//! Adapter implementations for the member directory ports.

pub mod memory;
pub mod postgres;
