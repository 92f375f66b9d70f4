//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// User records table.
    ///
    /// The `id` column is the primary key, generated application-side as a
    /// random UUID. All three text columns are mandatory.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Given name (max 255 characters).
        first_name -> Varchar,
        /// Family name (max 255 characters).
        last_name -> Varchar,
        /// Contact email address (max 255 characters).
        email -> Varchar,
    }
}
