//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// User documents.
    ///
    /// `document` holds every field except `id` and `email`, which are
    /// promoted to columns so they can be addressed and indexed.
    users (id) {
        /// Opaque identifier; generated as a UUID string on insert.
        id -> Text,
        /// Creation uniqueness key, compared byte-for-byte (indexed, not unique).
        email -> Text,
        /// Remaining document fields as a JSON object.
        document -> Jsonb,
        /// Insertion timestamp, used for stable listing order.
        created_at -> Timestamptz,
        /// Last overwrite timestamp.
        updated_at -> Timestamptz,
    }
}
