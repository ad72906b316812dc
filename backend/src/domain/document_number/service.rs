//! Document number allocation service implementing the driving ports.
//!
//! All counter state lives behind [`CounterStore`]; the service keeps no
//! cached sequence values, so every allocation is a fresh atomic
//! read-modify-write in the store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, warn};

use super::counter::{CounterKey, CounterMutation};
use super::error::DocumentNumberError;
use super::number::{CandidateNumber, CustomDocumentNumber, DocumentNumber};
use super::prefix::DocumentPrefixError;
use super::serial_date::SerialDate;
use crate::domain::UserId;
use crate::domain::ports::{
    CounterStore, DocumentNumberCommand, DocumentNumberQuery, DocumentNumberRequest,
};

/// Allocator for sequential per-owner, per-prefix, per-day document numbers.
#[derive(Clone)]
pub struct DocumentNumberService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> DocumentNumberService<S> {
    /// Create a service over `store`, reading dates from `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use docket::domain::DocumentNumberService;
    /// # use docket::outbound::memory::InMemoryCounterStore;
    /// # use mockable::DefaultClock;
    /// let service = DocumentNumberService::new(
    ///     Arc::new(InMemoryCounterStore::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn today(&self) -> SerialDate {
        SerialDate::today(self.clock.as_ref())
    }

    fn todays_key(
        &self,
        owner: &UserId,
        request: &DocumentNumberRequest,
    ) -> Result<CounterKey, DocumentNumberError> {
        let prefix = request.prefix()?;
        Ok(CounterKey::new(owner.clone(), prefix, self.today()))
    }
}

#[async_trait]
impl<S> DocumentNumberCommand for DocumentNumberService<S>
where
    S: CounterStore,
{
    async fn generate(
        &self,
        owner: Option<&UserId>,
        request: &DocumentNumberRequest,
    ) -> Result<DocumentNumber, DocumentNumberError> {
        let owner = owner.ok_or(DocumentNumberError::Unauthenticated)?;
        let key = self.todays_key(owner, request)?;

        let transition = self
            .store
            .apply(&key, CounterMutation::Increment, self.clock.utc())
            .await
            .map_err(|err| {
                error!(counter_key = %key, error = %err, "document number generation failed");
                DocumentNumberError::GenerationFailed(err)
            })?;

        let number = DocumentNumber::new(
            key.prefix().clone(),
            key.date(),
            transition.counter.last_number,
        );
        debug!(counter_key = %key, document_number = %number, "issued document number");
        Ok(number)
    }

    async fn reset(
        &self,
        owner: Option<&UserId>,
        request: &DocumentNumberRequest,
    ) -> Result<(), DocumentNumberError> {
        let owner = owner.ok_or(DocumentNumberError::Unauthenticated)?;
        let key = self.todays_key(owner, request)?;

        let transition = self
            .store
            .apply(&key, CounterMutation::Reset, self.clock.utc())
            .await
            .map_err(|err| {
                error!(counter_key = %key, error = %err, "document counter reset failed");
                DocumentNumberError::ResetFailed(err)
            })?;

        warn!(
            counter_key = %key,
            previous_last_number = transition.previous_number,
            "document counter reset; numbers issued earlier today will be issued again"
        );
        Ok(())
    }
}

#[async_trait]
impl<S> DocumentNumberQuery for DocumentNumberService<S>
where
    S: CounterStore,
{
    async fn last_number(
        &self,
        owner: Option<&UserId>,
        request: &DocumentNumberRequest,
    ) -> Option<DocumentNumber> {
        let owner = owner?;
        let key = match self.todays_key(owner, request) {
            Ok(key) => key,
            Err(err) => {
                debug!(error = %err, "last number requested for unusable prefix");
                return None;
            }
        };

        match self.store.find(&key).await {
            Ok(counter) => counter.map(|counter| {
                DocumentNumber::new(key.prefix().clone(), key.date(), counter.last_number)
            }),
            Err(err) => {
                warn!(counter_key = %key, error = %err, "last document number lookup failed");
                None
            }
        }
    }

    async fn is_available(&self, owner: Option<&UserId>, candidate: &str) -> bool {
        let Some(owner) = owner else {
            return false;
        };
        let parts = match CandidateNumber::split(candidate) {
            Ok(parts) => parts,
            Err(err) => {
                debug!(candidate, error = %err, "malformed document number candidate");
                return false;
            }
        };
        let Some((prefix, date)) = parts.counter_parts() else {
            debug!(candidate, "candidate names a counter that cannot exist");
            return true;
        };

        let key = CounterKey::new(owner.clone(), prefix, date);
        match self.store.find(&key).await {
            Ok(None) => true,
            Ok(Some(counter)) => parts.sequence() > counter.last_number,
            Err(err) => {
                warn!(counter_key = %key, error = %err, "availability lookup failed");
                false
            }
        }
    }

    fn custom_number(
        &self,
        prefix: &str,
        suffix: Option<&str>,
    ) -> Result<CustomDocumentNumber, DocumentNumberError> {
        if prefix.is_empty() {
            return Err(DocumentPrefixError::Empty.into());
        }
        Ok(CustomDocumentNumber::new(
            prefix,
            self.today(),
            suffix.map(str::to_owned),
        ))
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
