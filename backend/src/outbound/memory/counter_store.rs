//! In-memory [`CounterStore`] owning one async mutex per counter.
//!
//! A short-lived registry lock hands out the per-key slot; the slot's async
//! mutex is then held across the whole read-modify-write. Same-key callers
//! queue on the slot in arrival order while other keys proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{CounterStore, CounterStoreError};
use crate::domain::{CounterKey, CounterMutation, CounterTransition, DocumentNumberCounter};

type CounterSlot = Arc<tokio::sync::Mutex<Option<DocumentNumberCounter>>>;

/// Counter store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    slots: Mutex<HashMap<CounterKey, CounterSlot>>,
}

impl InMemoryCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<CounterKey, CounterSlot>>, CounterStoreError>
    {
        self.slots
            .lock()
            .map_err(|_| CounterStoreError::connection("counter registry lock poisoned"))
    }

    fn existing_slot(&self, key: &CounterKey) -> Result<Option<CounterSlot>, CounterStoreError> {
        Ok(self.registry()?.get(key).cloned())
    }

    fn slot(&self, key: &CounterKey) -> Result<CounterSlot, CounterStoreError> {
        let mut slots = self.registry()?;
        Ok(Arc::clone(slots.entry(key.clone()).or_default()))
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn find(
        &self,
        key: &CounterKey,
    ) -> Result<Option<DocumentNumberCounter>, CounterStoreError> {
        let Some(slot) = self.existing_slot(key)? else {
            return Ok(None);
        };
        let counter = slot.lock().await.clone();
        Ok(counter)
    }

    async fn apply(
        &self,
        key: &CounterKey,
        mutation: CounterMutation,
        now: DateTime<Utc>,
    ) -> Result<CounterTransition, CounterStoreError> {
        let slot = self.slot(key)?;
        let mut guard = slot.lock().await;

        let mut counter = guard
            .clone()
            .unwrap_or_else(|| DocumentNumberCounter::fresh(key.clone(), now));
        let previous_number = counter
            .apply(mutation, now)
            .ok_or_else(|| CounterStoreError::exhausted(key.to_string()))?;
        *guard = Some(counter.clone());

        debug!(
            counter_key = %key,
            last_number = counter.last_number,
            ?mutation,
            "counter committed"
        );
        Ok(CounterTransition {
            previous_number,
            counter,
        })
    }
}
