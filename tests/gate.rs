//! Integration tests for both gate adapters against a mocked validation API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Router};
use http_body_util::BodyExt;
use mockito::Matcher;
use serde_json::{json, Value};
use tower::ServiceExt;

use gatekey::gate::{RateLimitedHook, RateLimitedResponse, ValidationErrorHook};
use gatekey::{require_api_key, wrap, Client, ClientConfig, Gate, GateError, GateOptions};

mod common;

fn gate_for(server: &mockito::ServerGuard, options: GateOptions) -> Arc<Gate> {
    common::init_tracing();
    let client = Client::new(ClientConfig::new("gk_service").with_base_url(server.url()));
    Arc::new(Gate::with_options(Arc::new(client), options))
}

fn app(gate: Arc<Gate>) -> Router {
    Router::new()
        .route("/data", get(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(gate, require_api_key))
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const DENIED_BODY: &str = r#"{
    "allowed": false,
    "details": {
        "currentUsage": 1000,
        "limit": 1000,
        "planName": "starter",
        "periodStart": "2026-08-01T00:00:00Z",
        "periodEnd": "2026-09-01T00:00:00Z"
    }
}"#;

#[tokio::test]
async fn missing_credential_rejects_without_remote_call() {
    let mut server = mockito::Server::new_async().await;
    let validate = server
        .mock("POST", "/validate")
        .expect(0)
        .create_async()
        .await;

    let hook_fired = Arc::new(AtomicBool::new(false));
    let flag = hook_fired.clone();
    let hook: ValidationErrorHook = Arc::new(move |err: &GateError| {
        assert!(matches!(err, GateError::MissingCredential));
        flag.store(true, Ordering::SeqCst);
    });

    let gate = gate_for(&server, GateOptions::new().on_validation_error(hook));
    let response = app(gate)
        .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "API Key required" }));
    assert!(hook_fired.load(Ordering::SeqCst));
    validate.assert_async().await;
}

#[tokio::test]
async fn allowed_request_reaches_the_inner_service() {
    let mut server = mockito::Server::new_async().await;
    let validate = server
        .mock("POST", "/validate")
        .match_body(Matcher::Json(json!({
            "apiKey": "gk_abc",
            "path": "/data",
            "method": "GET"
        })))
        .with_body(r#"{"allowed":true}"#)
        .expect(1)
        .create_async()
        .await;

    let gate = gate_for(&server, GateOptions::new());
    let response = app(gate)
        .oneshot(
            Request::builder()
                .uri("/data")
                .header("Authorization", "Bearer gk_abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
    validate.assert_async().await;
}

#[tokio::test]
async fn denied_request_gets_429_with_details() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/validate")
        .with_body(DENIED_BODY)
        .create_async()
        .await;

    let hook_fired = Arc::new(AtomicBool::new(false));
    let flag = hook_fired.clone();
    let hook: RateLimitedHook = Arc::new(move |outcome| {
        assert_eq!(outcome.details.as_ref().unwrap().plan_name, "starter");
        flag.store(true, Ordering::SeqCst);
    });

    let gate = gate_for(&server, GateOptions::new().on_rate_limited(hook));
    let response = app(gate)
        .oneshot(
            Request::builder()
                .uri("/data")
                .header("Authorization", "Bearer gk_abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Rate limit exceeded");
    assert_eq!(body["details"]["currentUsage"], 1000);
    assert_eq!(body["details"]["planName"], "starter");
    assert!(hook_fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn denied_without_details_omits_the_details_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/validate")
        .with_body(r#"{"allowed":false}"#)
        .create_async()
        .await;

    let gate = gate_for(&server, GateOptions::new());
    let response = app(gate)
        .oneshot(
            Request::builder()
                .uri("/data")
                .header("Authorization", "Bearer gk_abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    // No details on the outcome: the key is absent from the body, not null.
    assert_eq!(body_json(response).await, json!({ "error": "Rate limit exceeded" }));
}

#[tokio::test]
async fn validation_failure_becomes_500_and_never_escapes() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/validate")
        .with_status(503)
        .with_body(r#"{"error":"upstream down"}"#)
        .create_async()
        .await;

    let hook_fired = Arc::new(AtomicBool::new(false));
    let flag = hook_fired.clone();
    let hook: ValidationErrorHook = Arc::new(move |err: &GateError| {
        match err {
            GateError::Validation(api_err) => assert_eq!(api_err.status_code(), 503),
            GateError::MissingCredential => panic!("wrong hook reason"),
        }
        flag.store(true, Ordering::SeqCst);
    });

    let gate = gate_for(&server, GateOptions::new().on_validation_error(hook));
    let response = app(gate)
        .oneshot(
            Request::builder()
                .uri("/data")
                .header("Authorization", "Bearer gk_abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Validation error" }));
    assert!(hook_fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn credential_without_bearer_prefix_is_accepted_verbatim() {
    // Current behavior: the prefix is optional and not validated.
    let mut server = mockito::Server::new_async().await;
    let validate = server
        .mock("POST", "/validate")
        .match_body(Matcher::PartialJson(json!({ "apiKey": "gk_raw" })))
        .with_body(r#"{"allowed":true}"#)
        .create_async()
        .await;

    let gate = gate_for(&server, GateOptions::new());
    let response = app(gate)
        .oneshot(
            Request::builder()
                .uri("/data")
                .header("Authorization", "gk_raw")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    validate.assert_async().await;
}

#[tokio::test]
async fn custom_header_name_is_honored() {
    let mut server = mockito::Server::new_async().await;
    let validate = server
        .mock("POST", "/validate")
        .match_body(Matcher::PartialJson(json!({ "apiKey": "gk_custom" })))
        .with_body(r#"{"allowed":true}"#)
        .create_async()
        .await;

    let gate = gate_for(&server, GateOptions::new().header_name("x-api-key"));
    let response = app(gate)
        .oneshot(
            Request::builder()
                .uri("/data")
                .header("x-api-key", "Bearer gk_custom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    validate.assert_async().await;
}

#[tokio::test]
async fn wrap_skips_handler_without_credential() {
    let mut server = mockito::Server::new_async().await;
    let validate = server
        .mock("POST", "/validate")
        .expect(0)
        .create_async()
        .await;

    let invoked = Arc::new(AtomicBool::new(false));
    let flag = invoked.clone();
    let handler = move |_req: Request<Body>| {
        let flag = flag.clone();
        async move {
            flag.store(true, Ordering::SeqCst);
            Response::new(Body::from("handled"))
        }
    };

    let gate = gate_for(&server, GateOptions::new());
    let wrapped = wrap(gate, handler);
    let response = wrapped(Request::builder().uri("/data").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!invoked.load(Ordering::SeqCst));
    validate.assert_async().await;
}

#[tokio::test]
async fn wrap_delegates_when_allowed_and_excludes_query_string() {
    let mut server = mockito::Server::new_async().await;
    let validate = server
        .mock("POST", "/validate")
        .match_body(Matcher::Json(json!({
            "apiKey": "gk_abc",
            "path": "/data",
            "method": "GET"
        })))
        .with_body(r#"{"allowed":true}"#)
        .expect(1)
        .create_async()
        .await;

    let handler =
        |_req: Request<Body>| async move { Response::new(Body::from("handled")) };

    let gate = gate_for(&server, GateOptions::new());
    let wrapped = wrap(gate, handler);
    let response = wrapped(
        Request::builder()
            .uri("/data?page=2&limit=5")
            .header("Authorization", "Bearer gk_abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"handled");
    validate.assert_async().await;
}

#[tokio::test]
async fn wrap_uses_the_override_producer_when_denied() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/validate")
        .with_body(DENIED_BODY)
        .create_async()
        .await;

    let producer: RateLimitedResponse = Arc::new(|outcome| {
        let mut response = Response::new(Body::from(format!(
            "over quota on {}",
            outcome.details.as_ref().unwrap().plan_name
        )));
        *response.status_mut() = StatusCode::PAYMENT_REQUIRED;
        response
    });

    let gate = gate_for(&server, GateOptions::new().rate_limited_response(producer));
    let wrapped = wrap(gate, |_req: Request<Body>| async move {
        Response::new(Body::from("handled"))
    });
    let response = wrapped(
        Request::builder()
            .uri("/data")
            .header("Authorization", "Bearer gk_abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"over quota on starter");
}

#[tokio::test]
async fn wrap_turns_validation_failure_into_500() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/validate")
        .with_status(500)
        .with_body(r#"{"error":"boom"}"#)
        .create_async()
        .await;

    let gate = gate_for(&server, GateOptions::new());
    let wrapped = wrap(gate, |_req: Request<Body>| async move {
        Response::new(Body::from("handled"))
    });
    let response = wrapped(
        Request::builder()
            .uri("/data")
            .header("Authorization", "Bearer gk_abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Validation error" }));
}
