//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` each carry a unique constraint
    /// (`users_username_key`, `users_email_key`); writes violating either are
    /// rejected by PostgreSQL and surfaced as unique-violation errors.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, case-sensitive login name.
        username -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        /// PHC-format Argon2id hash; plaintext never reaches the database.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Forum posts.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Post title.
        title -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
