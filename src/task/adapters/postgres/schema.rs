//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority level.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional assignee reference. Not a foreign key: members may be
        /// deleted while still referenced.
        assignee_id -> Nullable<Uuid>,
        /// Ordered labels.
        tags -> Array<Text>,
        /// Optional project reference.
        project_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
