//! Driving port for read-only document number operations.
//!
//! Queries are advisory: they never fail. Missing identity or store trouble
//! degrades to "no number" or "not available".

use async_trait::async_trait;

use crate::domain::{CustomDocumentNumber, DocumentNumber, DocumentNumberError, UserId};

use super::DocumentNumberRequest;

/// Driving port for inspecting counters and composing custom numbers.
#[async_trait]
pub trait DocumentNumberQuery: Send + Sync {
    /// Most recently issued number on today's counter.
    ///
    /// Returns `None` when the counter does not exist, when `owner` is
    /// `None`, when the custom prefix is unusable, or when the store cannot
    /// be read.
    async fn last_number(
        &self,
        owner: Option<&UserId>,
        request: &DocumentNumberRequest,
    ) -> Option<DocumentNumber>;

    /// Heuristic check that `candidate` has not been issued yet.
    ///
    /// Candidates without exactly one `-` or without an integer after the
    /// six date characters are never available. A candidate whose counter
    /// does not exist, including one whose prefix or date no counter could
    /// carry, is available; otherwise its sequence must exceed the counter's
    /// last number. This does not reserve anything.
    async fn is_available(&self, owner: Option<&UserId>, candidate: &str) -> bool;

    /// Compose `{prefix}-{YYMMDD}{suffix}` for today without touching any
    /// counter. Both parts are used verbatim.
    ///
    /// # Errors
    ///
    /// [`DocumentNumberError::InvalidPrefix`] when the prefix is empty.
    fn custom_number(
        &self,
        prefix: &str,
        suffix: Option<&str>,
    ) -> Result<CustomDocumentNumber, DocumentNumberError>;
}
