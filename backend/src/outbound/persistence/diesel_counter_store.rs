//! PostgreSQL-backed `CounterStore` implementation using Diesel ORM.
//!
//! Each mutation runs in one transaction: the row is seeded with
//! `INSERT ... ON CONFLICT DO NOTHING`, locked with `SELECT ... FOR UPDATE`,
//! advanced in memory, and written back. The row lock serializes writers of
//! the same key; other keys lock other rows and never wait. Serialization
//! failures are retried a bounded number of times.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{CounterStore, CounterStoreError};
use crate::domain::{CounterKey, CounterMutation, CounterTransition, DocumentNumberCounter};

use super::models::{CounterState, CounterUpdate, NewCounterRow};
use super::pool::{DbPool, PoolError};
use super::schema::document_number_counters;

/// Diesel-backed implementation of the `CounterStore` port.
#[derive(Clone)]
pub struct DieselCounterStore {
    pool: DbPool,
    max_attempts: u32,
}

impl DieselCounterStore {
    /// Default number of transaction attempts per mutation.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Create a store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Bound the number of transaction attempts; values below one are raised
    /// to one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Failures raised inside the counter transaction.
#[derive(Debug)]
enum TransactionError {
    Diesel(DieselError),
    Exhausted,
    NegativeCount(i64),
}

impl From<DieselError> for TransactionError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl TransactionError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Diesel(DieselError::DatabaseError(
                DatabaseErrorKind::SerializationFailure,
                _
            ))
        )
    }
}

/// Map pool errors to counter store errors.
fn map_pool_error(error: PoolError) -> CounterStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CounterStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to counter store errors.
///
/// Database messages are logged at `debug` and never copied into the
/// returned error.
fn map_diesel_error(error: DieselError) -> CounterStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => CounterStoreError::query("counter row not found"),
        DieselError::QueryBuilderError(_) => CounterStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CounterStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            CounterStoreError::query("counter constraint violated")
        }
        _ => CounterStoreError::query("database error"),
    }
}

fn map_transaction_error(error: TransactionError, key: &CounterKey) -> CounterStoreError {
    match error {
        TransactionError::Diesel(error) => map_diesel_error(error),
        TransactionError::Exhausted => CounterStoreError::exhausted(key.to_string()),
        TransactionError::NegativeCount(value) => {
            warn!(counter_key = %key, value, "counter row holds a negative last_number");
            CounterStoreError::query("counter row is corrupt")
        }
    }
}

fn to_counter(
    key: &CounterKey,
    state: CounterState,
) -> Result<DocumentNumberCounter, CounterStoreError> {
    let raw = state.last_number;
    let last_number = u64::try_from(raw)
        .map_err(|_| map_transaction_error(TransactionError::NegativeCount(raw), key))?;
    Ok(DocumentNumberCounter {
        key: key.clone(),
        last_number,
        created_at: state.created_at,
        updated_at: state.updated_at,
    })
}

#[async_trait]
impl CounterStore for DieselCounterStore {
    async fn find(
        &self,
        key: &CounterKey,
    ) -> Result<Option<DocumentNumberCounter>, CounterStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let counter_key = key.to_string();

        let state: Option<CounterState> = document_number_counters::table
            .find(counter_key.as_str())
            .select(CounterState::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        state.map(|state| to_counter(key, state)).transpose()
    }

    async fn apply(
        &self,
        key: &CounterKey,
        mutation: CounterMutation,
        now: DateTime<Utc>,
    ) -> Result<CounterTransition, CounterStoreError> {
        let counter_key = key.to_string();
        let serial_date = key.date().to_string();
        let seed = NewCounterRow {
            counter_key: counter_key.as_str(),
            owner_id: *key.owner().as_uuid(),
            prefix: key.prefix().as_str(),
            serial_date: serial_date.as_str(),
            last_number: 0,
            created_at: now,
            updated_at: now,
        };

        let mut attempt = 1;
        loop {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let seed = &seed;
            let result: Result<(u64, CounterState), TransactionError> = conn
                .transaction(|conn| {
                    async move {
                        diesel::insert_into(document_number_counters::table)
                            .values(seed)
                            .on_conflict(document_number_counters::counter_key)
                            .do_nothing()
                            .execute(conn)
                            .await?;

                        let current: CounterState = document_number_counters::table
                            .find(seed.counter_key)
                            .select(CounterState::as_select())
                            .for_update()
                            .get_result(conn)
                            .await?;

                        let current_value = u64::try_from(current.last_number)
                            .map_err(|_| TransactionError::NegativeCount(current.last_number))?;
                        let next = mutation
                            .next_value(current_value)
                            .and_then(|next| i64::try_from(next).ok())
                            .ok_or(TransactionError::Exhausted)?;

                        let updated = diesel::update(
                            document_number_counters::table.find(seed.counter_key),
                        )
                        .set(&CounterUpdate {
                            last_number: next,
                            updated_at: now,
                        })
                        .returning(CounterState::as_returning())
                        .get_result(conn)
                        .await?;
                        Ok((current_value, updated))
                    }
                    .scope_boxed()
                })
                .await;

            match result {
                Ok((previous_number, state)) => {
                    debug!(
                        counter_key = %key,
                        ?mutation,
                        last_number = state.last_number,
                        attempt,
                        "counter committed"
                    );
                    return Ok(CounterTransition {
                        previous_number,
                        counter: to_counter(key, state)?,
                    });
                }
                Err(error) if error.is_retryable() && attempt < self.max_attempts => {
                    debug!(
                        counter_key = %key,
                        attempt,
                        "counter transaction conflicted; retrying"
                    );
                    attempt += 1;
                }
                Err(error) if error.is_retryable() => {
                    warn!(
                        counter_key = %key,
                        attempts = attempt,
                        "counter transaction abandoned"
                    );
                    return Err(CounterStoreError::contention(attempt));
                }
                Err(error) => return Err(map_transaction_error(error, key)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for counter store error mapping.
    use super::*;
    use rstest::rstest;

    struct StubInfo;

    impl diesel::result::DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            "could not serialize access"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo))
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert_eq!(err, CounterStoreError::connection("connection refused"));
    }

    #[rstest]
    #[case(DieselError::NotFound, CounterStoreError::query("counter row not found"))]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        CounterStoreError::connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation),
        CounterStoreError::query("counter constraint violated")
    )]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation),
        CounterStoreError::query("database error")
    )]
    fn diesel_errors_map_without_leaking_messages(
        #[case] error: DieselError,
        #[case] expected: CounterStoreError,
    ) {
        let mapped = map_diesel_error(error);
        assert_eq!(mapped, expected);
        assert!(!mapped.to_string().contains("serialize access"));
    }

    #[rstest]
    fn only_serialization_failures_are_retried() {
        let conflict =
            TransactionError::Diesel(database_error(DatabaseErrorKind::SerializationFailure));
        let unique = TransactionError::Diesel(database_error(DatabaseErrorKind::UniqueViolation));

        assert!(conflict.is_retryable());
        assert!(!unique.is_retryable());
        assert!(!TransactionError::Exhausted.is_retryable());
    }
}
