//! Handler-wrapping gate adapter.
//!
//! Wraps an owned request→response function so the validation step runs
//! before the handler. Unlike the middleware adapter this one only guards its
//! own validation step: whatever the wrapped handler does with the request is
//! its own business, including failing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tracing::{error, warn};

use crate::gate::extract::extract_credential;
use crate::gate::{reject_rate_limited, reject_unauthorized, reject_validation_error, Gate};

/// Future returned by a wrapped handler.
pub type BoxedResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Wrap `handler` so it only runs for requests the gate allows.
///
/// - no credential → 401 without invoking `handler`
/// - denied → the configured `rate_limited_response` producer, else 429
/// - validation error → logged, 500
/// - allowed → `handler`'s response, returned as-is
///
/// Only the path component of the URI is validated; the query string never
/// reaches the validation endpoint.
pub fn wrap<H, Fut>(
    gate: Arc<Gate>,
    handler: H,
) -> impl Fn(Request<Body>) -> BoxedResponseFuture + Clone
where
    H: Fn(Request<Body>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    move |request: Request<Body>| {
        let gate = gate.clone();
        let handler = handler.clone();
        Box::pin(async move {
            let Some(credential) = extract_credential(request.headers(), gate.header_name())
            else {
                warn!(path = %request.uri().path(), "Request rejected: no API key presented");
                return reject_unauthorized();
            };

            let path = request.uri().path().to_string();
            let method = request.method().as_str().to_string();

            match gate.client().validate(&credential, &path, &method).await {
                Ok(outcome) if outcome.allowed => handler(request).await,
                Ok(outcome) => {
                    warn!(path = %path, method = %method, "Rate limit exceeded");
                    if let Some(producer) = &gate.options().rate_limited_response {
                        return producer(&outcome);
                    }
                    reject_rate_limited(&outcome)
                }
                Err(err) => {
                    error!(path = %path, status = err.status_code(), error = %err, "API key validation failed");
                    reject_validation_error()
                }
            }
        })
    }
}
