//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response, and error schemas they exchange, plus the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::DocumentNumberRequest;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::document_numbers::{
    AvailabilityResponse, DocumentNumberResponse, LastDocumentNumberResponse,
};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Docket API",
        description = "Sequential per-owner, per-day document number allocation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::document_numbers::generate_document_number,
        crate::inbound::http::document_numbers::get_last_document_number,
        crate::inbound::http::document_numbers::reset_daily_counter,
        crate::inbound::http::document_numbers::document_number_availability,
        crate::inbound::http::document_numbers::generate_custom_document_number,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        DocumentNumberRequest,
        DocumentNumberResponse,
        LastDocumentNumberResponse,
        AvailabilityResponse,
    )),
    tags(
        (name = "users", description = "Session login and logout"),
        (name = "document-numbers", description = "Document number allocation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/document-numbers")]
    #[case("/api/v1/document-numbers/last")]
    #[case("/api/v1/document-numbers/reset")]
    #[case("/api/v1/document-numbers/availability")]
    #[case("/api/v1/document-numbers/custom")]
    #[case("/health/ready")]
    fn openapi_registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("DocumentNumberRequest", "documentType")]
    #[case("DocumentNumberResponse", "documentNumber")]
    #[case("AvailabilityResponse", "available")]
    fn openapi_schemas_use_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }
}
