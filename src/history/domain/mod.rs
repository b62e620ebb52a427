//! Domain model for audit trail entries.

mod entry;
mod error;
mod ids;

pub use entry::{HistoryAction, HistoryEntry, PersistedHistoryEntryData};
pub use error::ParseHistoryActionError;
pub use ids::HistoryEntryId;
