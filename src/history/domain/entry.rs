//! History entry record and action vocabulary.

use super::{HistoryEntryId, ParseHistoryActionError};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation a history entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// The task was created.
    Create,
    /// Task fields changed or the task was assigned.
    Update,
    /// The task advanced along the status sequence.
    StatusChange,
    /// The task was deleted.
    Delete,
}

impl HistoryAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::StatusChange => "status_change",
            Self::Delete => "delete",
        }
    }
}

impl TryFrom<&str> for HistoryAction {
    type Error = ParseHistoryActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "status_change" => Ok(Self::StatusChange),
            "delete" => Ok(Self::Delete),
            _ => Err(ParseHistoryActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable audit record for one task mutation.
///
/// Entries have no mutators: once built they are only stored and read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    action: HistoryAction,
    details: String,
    timestamp: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHistoryEntryData {
    /// Persisted entry identifier.
    pub id: HistoryEntryId,
    /// Identifier of the audited task.
    pub task_id: TaskId,
    /// Persisted action.
    pub action: HistoryAction,
    /// Persisted human-readable details.
    pub details: String,
    /// Persisted creation timestamp.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates a new entry stamped with the current clock time.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        action: HistoryAction,
        details: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            action,
            details: details.into(),
            timestamp: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryEntryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            action: data.action,
            details: data.details,
            timestamp: data.timestamp,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the audited task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> HistoryAction {
        self.action
    }

    /// Returns the human-readable details.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
