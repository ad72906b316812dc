//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Document number counters.
    ///
    /// One row per owner, prefix, and local calendar day. `counter_key` is
    /// the rendered `{owner}_{prefix}_{YYMMDD}` key.
    document_number_counters (counter_key) {
        /// Primary key: rendered counter key.
        counter_key -> Varchar,
        /// Owning user.
        owner_id -> Uuid,
        /// Alphanumeric document prefix.
        prefix -> Varchar,
        /// Calendar day formatted as `YYMMDD`.
        serial_date -> Varchar,
        /// Highest sequence issued so far; never negative.
        last_number -> Int8,
        /// Row creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
