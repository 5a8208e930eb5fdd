//! Request gating subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → extract.rs (resolve bearer credential from headers)
//!     → middleware.rs / wrap.rs
//!         missing credential → 401
//!         validate error     → 500
//!         denied             → 429
//!         allowed            → delegate to the application
//!     → client::executor (POST /validate, exactly one call)
//! ```
//!
//! Both adapters are stateless beyond the validation call they trigger; the
//! shared [`Gate`] holds only the client and immutable options.

pub mod extract;
pub mod middleware;
pub mod wrap;

pub use middleware::require_api_key;
pub use wrap::wrap;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::client::{ApiError, Client};
use crate::resources::ValidationOutcome;

/// Standard header the credential is read from when no custom header is set.
pub const DEFAULT_CREDENTIAL_HEADER: &str = "authorization";

/// Reason handed to the validation-error hook.
#[derive(Debug)]
pub enum GateError {
    /// No credential could be resolved from the request headers.
    MissingCredential,
    /// The validate call itself failed.
    Validation(ApiError),
}

/// Hook invoked when a request is rejected before or during validation.
pub type ValidationErrorHook = Arc<dyn Fn(&GateError) + Send + Sync>;

/// Hook invoked when the validation outcome denies the request.
pub type RateLimitedHook = Arc<dyn Fn(&ValidationOutcome) + Send + Sync>;

/// Producer overriding the default 429 response in [`wrap`].
pub type RateLimitedResponse = Arc<dyn Fn(&ValidationOutcome) -> Response + Send + Sync>;

/// Options shared by both gate adapters.
#[derive(Clone, Default)]
pub struct GateOptions {
    /// Header the credential is read from; the standard authorization header
    /// is used when unset, and also as fallback when the custom header is
    /// absent from a request.
    pub header_name: Option<String>,

    /// Called on missing credentials and validation failures (middleware
    /// adapter only).
    pub on_validation_error: Option<ValidationErrorHook>,

    /// Called when a validation outcome denies the request (middleware
    /// adapter only).
    pub on_rate_limited: Option<RateLimitedHook>,

    /// Replaces the default 429 response (handler-wrapping adapter only).
    pub rate_limited_response: Option<RateLimitedResponse>,
}

impl GateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the credential from a custom header (falling back to the
    /// standard authorization header when absent).
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    pub fn on_validation_error(mut self, hook: ValidationErrorHook) -> Self {
        self.on_validation_error = Some(hook);
        self
    }

    pub fn on_rate_limited(mut self, hook: RateLimitedHook) -> Self {
        self.on_rate_limited = Some(hook);
        self
    }

    pub fn rate_limited_response(mut self, producer: RateLimitedResponse) -> Self {
        self.rate_limited_response = Some(producer);
        self
    }
}

/// Shared state for the gate adapters: a client plus immutable options.
pub struct Gate {
    client: Arc<Client>,
    options: GateOptions,
}

impl Gate {
    /// Gate requests through the given client with default options.
    pub fn new(client: Arc<Client>) -> Self {
        Self::with_options(client, GateOptions::default())
    }

    pub fn with_options(client: Arc<Client>, options: GateOptions) -> Self {
        Self { client, options }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn header_name(&self) -> &str {
        self.options
            .header_name
            .as_deref()
            .unwrap_or(DEFAULT_CREDENTIAL_HEADER)
    }

    pub(crate) fn options(&self) -> &GateOptions {
        &self.options
    }
}

pub(crate) fn reject_unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "API Key required" })),
    )
        .into_response()
}

pub(crate) fn reject_rate_limited(outcome: &ValidationOutcome) -> Response {
    // The details key is omitted, not null, when the outcome carries none.
    let mut body = json!({ "error": "Rate limit exceeded" });
    if let Some(details) = &outcome.details {
        body["details"] = json!(details);
    }
    (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
}

pub(crate) fn reject_validation_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Validation error" })),
    )
        .into_response()
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("client", &self.client)
            .field("header_name", &self.header_name())
            .finish()
    }
}
