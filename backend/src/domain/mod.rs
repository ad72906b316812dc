//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `Error`: API error response payload.
//! - `ErrorCode`: stable error identifier.
//! - `UserId`: owner identity that partitions every counter.
//! - `DocumentNumberService`: allocator implementing the driving ports.

pub mod auth;
pub mod document_number;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::document_number::{
    CandidateNumber, CounterKey, CounterMutation, CounterTransition, CustomDocumentNumber,
    DocumentNumber, DocumentNumberCounter, DocumentNumberError, DocumentNumberParseError,
    DocumentNumberService, DocumentPrefix, DocumentPrefixError, DocumentType, MAX_SEQUENCE,
    SerialDate, SerialDateError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use docket::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
