//! Diesel schema for project persistence.

diesel::table! {
    /// Registered projects.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Upper-case unique key.
        key -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
