//! Diesel schema for history persistence.

diesel::table! {
    /// Append-only audit trail.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Audited task identifier. Not a foreign key: entries outlive tasks.
        task_id -> Uuid,
        /// Action label.
        #[max_length = 50]
        action -> Varchar,
        /// Human-readable details.
        details -> Text,
        /// Recording timestamp.
        timestamp -> Timestamptz,
    }
}
