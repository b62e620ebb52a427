//! Diesel schema for member persistence.

diesel::table! {
    /// Directory members.
    members (id) {
        /// Member identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Free-text role.
        role -> Text,
        /// Optional e-mail address.
        email -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
