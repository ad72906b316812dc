//! Failures surfaced by the document number driving ports.

use serde_json::json;

use super::prefix::DocumentPrefixError;
use crate::domain::Error;
use crate::domain::ports::CounterStoreError;

/// Errors returned by the document number service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentNumberError {
    /// No owner was supplied for an operation that mutates a counter.
    #[error("authentication required")]
    Unauthenticated,
    /// A caller-supplied prefix could not be used.
    #[error("invalid document prefix: {0}")]
    InvalidPrefix(#[from] DocumentPrefixError),
    /// The counter transaction did not commit; nothing was issued.
    #[error("document number generation failed: {0}")]
    GenerationFailed(#[source] CounterStoreError),
    /// The reset transaction did not commit; the counter is unchanged.
    #[error("document counter reset failed: {0}")]
    ResetFailed(#[source] CounterStoreError),
}

impl From<DocumentNumberError> for Error {
    fn from(value: DocumentNumberError) -> Self {
        match value {
            DocumentNumberError::Unauthenticated => Error::unauthorized("login required"),
            DocumentNumberError::InvalidPrefix(err) => {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "customPrefix",
                    "code": "invalid_prefix",
                }))
            }
            DocumentNumberError::GenerationFailed(err) => {
                Error::service_unavailable("failed to generate document number; please retry")
                    .with_details(json!({ "code": store_failure_code(&err) }))
            }
            DocumentNumberError::ResetFailed(err) => {
                Error::service_unavailable("failed to reset document counter; please retry")
                    .with_details(json!({ "code": store_failure_code(&err) }))
            }
        }
    }
}

fn store_failure_code(error: &CounterStoreError) -> &'static str {
    match error {
        CounterStoreError::Connection { .. } => "store_unavailable",
        CounterStoreError::Query { .. } => "store_error",
        CounterStoreError::Contention { .. } => "counter_contention",
        CounterStoreError::Exhausted { .. } => "counter_exhausted",
    }
}
