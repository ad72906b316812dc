//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::document_number_counters;

/// Mutable state of one counter row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = document_number_counters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CounterState {
    pub last_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for seeding a counter that has issued nothing.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = document_number_counters)]
pub(crate) struct NewCounterRow<'a> {
    pub counter_key: &'a str,
    pub owner_id: Uuid,
    pub prefix: &'a str,
    pub serial_date: &'a str,
    pub last_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied after a mutation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = document_number_counters)]
pub(crate) struct CounterUpdate {
    pub last_number: i64,
    pub updated_at: DateTime<Utc>,
}
