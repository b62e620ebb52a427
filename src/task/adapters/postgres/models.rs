//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Optional assignee reference.
    pub assignee_id: Option<uuid::Uuid>,
    /// Ordered labels.
    pub tags: Vec<String>,
    /// Optional project reference.
    pub project_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Optional assignee reference.
    pub assignee_id: Option<uuid::Uuid>,
    /// Ordered labels.
    pub tags: Vec<String>,
    /// Optional project reference.
    pub project_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update model. `None` leaves a column untouched; the nested options
/// distinguish writing `NULL` from skipping the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangesetRow {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description, `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<String>,
    /// Replacement priority.
    pub priority: Option<String>,
    /// Replacement assignee, `Some(None)` clears it.
    pub assignee_id: Option<Option<uuid::Uuid>>,
    /// Replacement labels.
    pub tags: Option<Vec<String>>,
    /// Replacement project reference.
    pub project_id: Option<uuid::Uuid>,
    /// Mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
