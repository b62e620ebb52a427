//! Diesel row models for history persistence.

use super::schema::task_history;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for history records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Audited task identifier.
    pub task_id: uuid::Uuid,
    /// Action label.
    pub action: String,
    /// Human-readable details.
    pub details: String,
    /// Recording timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Insert model for history records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_history)]
pub struct NewHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Audited task identifier.
    pub task_id: uuid::Uuid,
    /// Action label.
    pub action: String,
    /// Human-readable details.
    pub details: String,
    /// Recording timestamp.
    pub timestamp: DateTime<Utc>,
}
