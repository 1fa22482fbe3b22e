//! Diesel schema for user account persistence.

diesel::table! {
    /// User account records.
    users (id) {
        /// Opaque user identifier.
        #[max_length = 64]
        id -> Varchar,
        /// Email address, unique across users.
        #[max_length = 254]
        email -> Varchar,
        /// Nickname, unique across users.
        #[max_length = 32]
        nickname -> Varchar,
        /// First name.
        #[max_length = 50]
        first_name -> Varchar,
        /// Last name.
        #[max_length = 50]
        last_name -> Varchar,
        /// Authorization role.
        #[max_length = 16]
        role -> Varchar,
        /// Account status.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
