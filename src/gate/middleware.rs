//! Callback-style gate adapter for axum middleware stacks.
//!
//! Attach with `axum::middleware::from_fn_with_state(gate, require_api_key)`.
//! Every request is validated against the remote API before it reaches the
//! inner service; rejections terminate here and no error ever escapes to the
//! middleware's caller.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, warn};

use crate::gate::extract::extract_credential;
use crate::gate::{
    reject_rate_limited, reject_unauthorized, reject_validation_error, Gate, GateError,
};

/// Gate middleware: validate the caller's API key, then run the inner service.
pub async fn require_api_key(
    State(gate): State<Arc<Gate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // 1. Resolve the credential before anything touches the network.
    let Some(credential) = extract_credential(request.headers(), gate.header_name()) else {
        warn!(path = %request.uri().path(), "Request rejected: no API key presented");
        if let Some(hook) = &gate.options().on_validation_error {
            hook(&GateError::MissingCredential);
        }
        return reject_unauthorized();
    };

    let path = request.uri().path().to_string();
    let method = request.method().as_str().to_string();

    // 2. One remote validation call decides the outcome. Every failure mode
    // maps to a terminal response here.
    match gate.client().validate(&credential, &path, &method).await {
        Ok(outcome) if outcome.allowed => next.run(request).await,
        Ok(outcome) => {
            warn!(path = %path, method = %method, "Rate limit exceeded");
            if let Some(hook) = &gate.options().on_rate_limited {
                hook(&outcome);
            }
            reject_rate_limited(&outcome)
        }
        Err(err) => {
            error!(path = %path, status = err.status_code(), error = %err, "API key validation failed");
            if let Some(hook) = &gate.options().on_validation_error {
                hook(&GateError::Validation(err));
            }
            reject_validation_error()
        }
    }
}
