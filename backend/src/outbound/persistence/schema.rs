//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Complaint records.
    ///
    /// The `id` column is the primary key (UUID v4, assigned by the
    /// application). `likes` carries a non-negative check constraint in the
    /// migration; `submitted_at` orders ranking ties.
    complaints (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Submitter display name.
        name -> Varchar,
        /// Submitter registration code.
        register_no -> Varchar,
        /// Department the complaint targets; the filter key.
        department -> Varchar,
        /// Descriptive complaint category.
        type_of_complaint -> Varchar,
        /// Free-form complaint body.
        complaint_text -> Text,
        /// Engagement counter, moved only by the atomic increment.
        likes -> Int4,
        /// Record creation timestamp.
        submitted_at -> Timestamptz,
    }
}
