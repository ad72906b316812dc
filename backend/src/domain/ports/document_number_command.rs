//! Driving port for operations that mutate document number counters.
//!
//! Inbound adapters resolve the caller's identity and pass it explicitly;
//! `None` means the caller is unauthenticated and every mutation fails
//! closed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DocumentNumber, DocumentNumberError, DocumentPrefix, DocumentPrefixError, DocumentType, UserId,
};

/// Identifies which counter an operation targets for today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNumberRequest {
    /// Document category; unknown names fall back to the generic prefix.
    #[schema(value_type = String, example = "delivery")]
    pub document_type: DocumentType,
    /// Overrides the prefix derived from `document_type`.
    ///
    /// Blank values are treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "INV")]
    pub custom_prefix: Option<String>,
}

impl DocumentNumberRequest {
    /// Request targeting the default prefix of `document_type`.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            custom_prefix: None,
        }
    }

    /// Override the derived prefix.
    #[must_use]
    pub fn with_custom_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.custom_prefix = Some(prefix.into());
        self
    }

    /// Resolve the prefix this request allocates under.
    ///
    /// # Examples
    /// ```
    /// use docket::domain::DocumentType;
    /// use docket::domain::ports::DocumentNumberRequest;
    ///
    /// let request = DocumentNumberRequest::new(DocumentType::Warranty);
    /// assert_eq!(request.prefix().expect("prefix").as_str(), "WR");
    /// let request = request.with_custom_prefix("INV");
    /// assert_eq!(request.prefix().expect("prefix").as_str(), "INV");
    /// ```
    pub fn prefix(&self) -> Result<DocumentPrefix, DocumentPrefixError> {
        match self.custom_prefix.as_deref().filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => DocumentPrefix::new(raw),
            None => Ok(self.document_type.prefix()),
        }
    }
}

/// Driving port for allocating and resetting document numbers.
#[async_trait]
pub trait DocumentNumberCommand: Send + Sync {
    /// Issue the next number for today's counter.
    ///
    /// # Errors
    ///
    /// - [`DocumentNumberError::Unauthenticated`] when `owner` is `None`.
    /// - [`DocumentNumberError::InvalidPrefix`] for unusable custom prefixes.
    /// - [`DocumentNumberError::GenerationFailed`] when the counter
    ///   transaction does not commit; nothing is issued in that case.
    async fn generate(
        &self,
        owner: Option<&UserId>,
        request: &DocumentNumberRequest,
    ) -> Result<DocumentNumber, DocumentNumberError>;

    /// Overwrite today's counter with zero, creating it when absent.
    ///
    /// Numbers issued earlier today will be issued again afterwards.
    ///
    /// # Errors
    ///
    /// - [`DocumentNumberError::Unauthenticated`] when `owner` is `None`.
    /// - [`DocumentNumberError::InvalidPrefix`] for unusable custom prefixes.
    /// - [`DocumentNumberError::ResetFailed`] when the store rejects the write.
    async fn reset(
        &self,
        owner: Option<&UserId>,
        request: &DocumentNumberRequest,
    ) -> Result<(), DocumentNumberError>;
}
