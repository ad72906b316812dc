//! End-to-end HTTP tests for the document number API.
//!
//! The app is assembled from the library's public handlers and middleware
//! the same way the server binary wires them, with an in-memory counter
//! store and a clock pinned to 2025-10-10.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use docket::Trace;
use docket::domain::ports::FixtureLoginService;
use docket::domain::{DocumentNumberService, TRACE_ID_HEADER};
use docket::inbound::http::document_numbers::{
    document_number_availability, generate_custom_document_number, generate_document_number,
    get_last_document_number, reset_daily_counter,
};
use docket::inbound::http::error::{json_error_handler, query_error_handler};
use docket::inbound::http::session_config::SessionSettings;
use docket::inbound::http::state::HttpState;
use docket::inbound::http::users::{login, logout};
use docket::outbound::memory::InMemoryCounterStore;
use docket::test_support::clock::MutableClock;
use serde_json::{Value, json};

fn app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = Arc::new(DocumentNumberService::new(
        Arc::new(InMemoryCounterStore::new()),
        Arc::new(MutableClock::at_local_noon(2025, 10, 10)),
    ));
    let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session.middleware())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .service(login)
                .service(logout)
                .service(generate_document_number)
                .service(get_last_document_number)
                .service(reset_daily_counter)
                .service(document_number_availability)
                .service(generate_custom_document_number),
        )
}

async fn login_as(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> Cookie<'static> {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn generate(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    body: Value,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/document-numbers")
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await
}

async fn get_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: Option<&Cookie<'static>>,
    uri: &str,
) -> Value {
    let request = actix_test::TestRequest::get().uri(uri);
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let response = actix_test::call_service(app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn full_daily_cycle() {
    let app = actix_test::init_service(app()).await;
    let cookie = login_as(&app, "admin").await;

    let mut issued = Vec::new();
    for _ in 0..3 {
        let response = generate(&app, &cookie, json!({ "documentType": "delivery" })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        issued.push(body["documentNumber"].as_str().map(str::to_owned));
    }
    assert_eq!(
        issued,
        ["DN-25101001", "DN-25101002", "DN-25101003"].map(|n| Some(n.to_owned()))
    );

    let last = get_json(
        &app,
        Some(&cookie),
        "/api/v1/document-numbers/last?documentType=delivery",
    )
    .await;
    assert_eq!(last["documentNumber"], "DN-25101003");

    let taken = get_json(
        &app,
        Some(&cookie),
        "/api/v1/document-numbers/availability?candidate=DN-25101003",
    )
    .await;
    assert_eq!(taken, json!({ "candidate": "DN-25101003", "available": false }));

    let reset = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/document-numbers/reset")
            .cookie(cookie.clone())
            .set_json(json!({ "documentType": "delivery" }))
            .to_request(),
    )
    .await;
    assert_eq!(reset.status(), StatusCode::NO_CONTENT);

    let response = generate(&app, &cookie, json!({ "documentType": "delivery" })).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["documentNumber"], "DN-25101001");
}

#[actix_web::test]
async fn logout_makes_the_caller_anonymous() {
    let app = actix_test::init_service(app()).await;
    let cookie = login_as(&app, "clerk").await;
    let response = generate(&app, &cookie, json!({ "documentType": "warranty" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let logout_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);

    let last = get_json(
        &app,
        None,
        "/api/v1/document-numbers/last?documentType=warranty",
    )
    .await;
    assert_eq!(last["documentNumber"], Value::Null);
}

#[actix_web::test]
async fn unauthorised_responses_carry_trace_id() {
    let app = actix_test::init_service(app()).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/document-numbers")
            .set_json(json!({ "documentType": "delivery" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let header_trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header_trace);
}

#[actix_web::test]
async fn malformed_query_uses_error_envelope() {
    let app = actix_test::init_service(app()).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/document-numbers/availability")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_query");
}
