//! Document number HTTP handlers.
//!
//! ```text
//! POST /api/v1/document-numbers {"documentType":"delivery"}
//! GET /api/v1/document-numbers/last?documentType=delivery
//! POST /api/v1/document-numbers/reset {"documentType":"delivery"}
//! GET /api/v1/document-numbers/availability?candidate=DN-25101003
//! GET /api/v1/document-numbers/custom?prefix=WR&suffix=001
//! ```
//!
//! Handlers read the owner from the session and hand it to the domain as an
//! explicit argument. Anonymous callers get `401` from mutations, `null`
//! from the last-number lookup, and `false` from the availability check.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::ports::DocumentNumberRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response body carrying a single formatted number.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNumberResponse {
    /// Formatted number, `{prefix}-{YYMMDD}{sequence}`.
    #[schema(example = "DN-25101001")]
    pub document_number: String,
}

/// Response body for the last issued number; `null` when none exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastDocumentNumberResponse {
    /// Most recently issued number for today's counter.
    #[schema(example = "DN-25101003")]
    pub document_number: Option<String>,
}

/// Query parameters for `GET /document-numbers/availability`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Formatted number to check, e.g. `DN-25101003`.
    pub candidate: String,
}

/// Result of an availability check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// The candidate exactly as submitted.
    pub candidate: String,
    /// Whether the candidate lies above the owner's counter.
    pub available: bool,
}

/// Query parameters for `GET /document-numbers/custom`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomNumberQuery {
    /// Prefix placed before today's date.
    pub prefix: String,
    /// Optional text appended after the date as given.
    pub suffix: Option<String>,
}

/// Query parameters selecting today's counter for a read.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CounterSelector {
    /// Document category such as `delivery` or `warranty`.
    pub document_type: String,
    /// Overrides the prefix derived from `documentType`.
    pub custom_prefix: Option<String>,
}

impl From<CounterSelector> for DocumentNumberRequest {
    fn from(value: CounterSelector) -> Self {
        let request = DocumentNumberRequest::new(value.document_type.into());
        match value.custom_prefix {
            Some(prefix) => request.with_custom_prefix(prefix),
            None => request,
        }
    }
}

/// Issue the next document number for today.
#[utoipa::path(
    post,
    path = "/api/v1/document-numbers",
    request_body = DocumentNumberRequest,
    responses(
        (status = 201, description = "Number issued", body = DocumentNumberResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Counter store unavailable; retry", body = Error)
    ),
    tags = ["document-numbers"],
    operation_id = "generateDocumentNumber"
)]
#[post("/document-numbers")]
pub async fn generate_document_number(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DocumentNumberRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.user_id()?;
    let number = state
        .document_numbers
        .generate(owner.as_ref(), &payload)
        .await?;
    Ok(HttpResponse::Created().json(DocumentNumberResponse {
        document_number: number.to_string(),
    }))
}

/// Most recently issued number for today's counter.
#[utoipa::path(
    get,
    path = "/api/v1/document-numbers/last",
    params(CounterSelector),
    responses(
        (status = 200, description = "Last issued number or null", body = LastDocumentNumberResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["document-numbers"],
    operation_id = "getLastDocumentNumber"
)]
#[get("/document-numbers/last")]
pub async fn get_last_document_number(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CounterSelector>,
) -> ApiResult<web::Json<LastDocumentNumberResponse>> {
    let owner = session.user_id()?;
    let request = DocumentNumberRequest::from(query.into_inner());
    let last = state
        .document_numbers_query
        .last_number(owner.as_ref(), &request)
        .await;
    Ok(web::Json(LastDocumentNumberResponse {
        document_number: last.map(|number| number.to_string()),
    }))
}

/// Reset today's counter to zero.
///
/// Numbers already issued today will be issued again afterwards.
#[utoipa::path(
    post,
    path = "/api/v1/document-numbers/reset",
    request_body = DocumentNumberRequest,
    responses(
        (status = 204, description = "Counter reset"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Counter store unavailable; retry", body = Error)
    ),
    tags = ["document-numbers"],
    operation_id = "resetDailyCounter"
)]
#[post("/document-numbers/reset")]
pub async fn reset_daily_counter(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DocumentNumberRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.user_id()?;
    state
        .document_numbers
        .reset(owner.as_ref(), &payload)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Check whether a candidate number is above its counter's high-water mark.
#[utoipa::path(
    get,
    path = "/api/v1/document-numbers/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability verdict", body = AvailabilityResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["document-numbers"],
    operation_id = "isDocumentNumberAvailable"
)]
#[get("/document-numbers/availability")]
pub async fn document_number_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let owner = session.user_id()?;
    let AvailabilityQuery { candidate } = query.into_inner();
    let available = state
        .document_numbers_query
        .is_available(owner.as_ref(), &candidate)
        .await;
    Ok(web::Json(AvailabilityResponse {
        candidate,
        available,
    }))
}

/// Format a non-sequential number from today's date.
///
/// No counter is read or written.
#[utoipa::path(
    get,
    path = "/api/v1/document-numbers/custom",
    params(CustomNumberQuery),
    responses(
        (status = 200, description = "Formatted number", body = DocumentNumberResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["document-numbers"],
    operation_id = "generateCustomDocumentNumber",
    security([])
)]
#[get("/document-numbers/custom")]
pub async fn generate_custom_document_number(
    state: web::Data<HttpState>,
    query: web::Query<CustomNumberQuery>,
) -> ApiResult<web::Json<DocumentNumberResponse>> {
    let number = state
        .document_numbers_query
        .custom_number(&query.prefix, query.suffix.as_deref())?;
    Ok(web::Json(DocumentNumberResponse {
        document_number: number.to_string(),
    }))
}

#[cfg(test)]
#[path = "document_numbers_tests.rs"]
mod tests;
