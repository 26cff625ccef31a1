//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the migrations under `backend/migrations/` exactly;
//! regenerate with `diesel print-schema` after a schema change.

diesel::table! {
    /// Feedback submissions. Insert-only; no update or delete path exists.
    feedback (id) {
        /// Primary key: UUID v4 assigned by the application at insert.
        id -> Uuid,
        /// Submitter name, at least two characters.
        name -> Varchar,
        /// Optional contact address.
        email -> Nullable<Varchar>,
        /// Free-text comment, at least ten characters.
        message -> Text,
        /// Star rating, constrained to 1..=5 by a check constraint.
        rating -> Int2,
        /// Set by the database at insert.
        created_at -> Timestamptz,
        /// Equals created_at; retained for schema symmetry.
        updated_at -> Timestamptz,
    }
}
