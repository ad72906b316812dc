//! Port abstraction for document number counter persistence.
//!
//! The [`CounterStore`] trait is the only path through which counters
//! change. Adapters must apply a [`CounterMutation`] as one atomic
//! read-modify-write per key: concurrent calls for the same key serialize,
//! and calls for different keys never wait on each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CounterKey, CounterMutation, CounterTransition, DocumentNumberCounter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by counter store adapters.
    pub enum CounterStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "counter store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "counter store query failed: {message}",
        /// The transaction kept conflicting with concurrent writers.
        Contention { attempts: u32 } => "counter transaction abandoned after {attempts} attempts",
        /// The counter cannot advance past its maximum sequence.
        Exhausted { key: String } => "counter {key} cannot issue further numbers",
    }
}

/// Port for atomic counter reads and read-modify-write updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the counter for `key`, if one has been created.
    async fn find(&self, key: &CounterKey)
    -> Result<Option<DocumentNumberCounter>, CounterStoreError>;

    /// Atomically apply `mutation` to the counter for `key`.
    ///
    /// An absent counter is treated as `last_number = 0` and created with
    /// `created_at = now`. The returned transition carries the value read
    /// and the state committed in the same transaction. On error nothing is
    /// persisted.
    async fn apply(
        &self,
        key: &CounterKey,
        mutation: CounterMutation,
        now: DateTime<Utc>,
    ) -> Result<CounterTransition, CounterStoreError>;
}

/// Fixture implementation that never holds any counters.
///
/// Reads report no counter and every mutation commits against a fresh one,
/// so increments always yield `1`. Use it where counter state is not under
/// test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCounterStore;

#[async_trait]
impl CounterStore for FixtureCounterStore {
    async fn find(
        &self,
        _key: &CounterKey,
    ) -> Result<Option<DocumentNumberCounter>, CounterStoreError> {
        Ok(None)
    }

    async fn apply(
        &self,
        key: &CounterKey,
        mutation: CounterMutation,
        now: DateTime<Utc>,
    ) -> Result<CounterTransition, CounterStoreError> {
        let mut counter = DocumentNumberCounter::fresh(key.clone(), now);
        let previous_number = counter
            .apply(mutation, now)
            .ok_or_else(|| CounterStoreError::exhausted(key.to_string()))?;
        Ok(CounterTransition {
            previous_number,
            counter,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{DocumentPrefix, SerialDate, UserId};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn key() -> CounterKey {
        let date = SerialDate::from_naive(NaiveDate::from_ymd_opt(2025, 10, 10).expect("date"));
        CounterKey::new(
            UserId::random(),
            DocumentPrefix::new("DN").expect("prefix"),
            date,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_store_reports_no_counters(key: CounterKey) {
        let found = FixtureCounterStore
            .find(&key)
            .await
            .expect("fixture find should succeed");
        assert!(found.is_none());
    }

    #[rstest]
    #[case(CounterMutation::Increment, 1)]
    #[case(CounterMutation::Reset, 0)]
    #[tokio::test]
    async fn fixture_store_applies_to_fresh_counter(
        key: CounterKey,
        #[case] mutation: CounterMutation,
        #[case] expected: u64,
    ) {
        let transition = FixtureCounterStore
            .apply(&key, mutation, Utc::now())
            .await
            .expect("fixture apply should succeed");
        assert_eq!(transition.previous_number, 0);
        assert_eq!(transition.counter.last_number, expected);
        assert_eq!(transition.counter.key, key);
    }

    #[rstest]
    fn error_constructors_render_context() {
        assert_eq!(
            CounterStoreError::contention(3_u32).to_string(),
            "counter transaction abandoned after 3 attempts"
        );
        assert_eq!(
            CounterStoreError::connection("refused").to_string(),
            "counter store connection failed: refused"
        );
    }
}
