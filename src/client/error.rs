//! Error normalization for outbound API calls.
//!
//! Every failed call produces exactly one [`ApiError`]; normalization happens
//! once per call chain. Resource methods propagate the value unchanged, so an
//! `ApiError` is never wrapped inside another `ApiError`.

use serde_json::{json, Value};
use thiserror::Error;

/// Broad classification of a failed call, checkable without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-success HTTP status.
    Response,
    /// The request went out but no response arrived.
    Transport,
    /// The call failed before a request could be sent.
    Unknown,
}

/// Normalized error for every failed outbound call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP status indicated failure. The message comes from the response
    /// body's `error` field when present, else a synthesized status line.
    #[error("{message}")]
    Response {
        message: String,
        /// The HTTP status code.
        status: u16,
        /// The full response body, when it could be decoded.
        body: Option<Value>,
    },

    /// A request was sent but no response was received (DNS failure, refused
    /// connection, timeout).
    #[error("Network error: {message}")]
    Transport { message: String },

    /// Anything not classifiable as the other two.
    #[error("Unknown error occurred")]
    Unknown,
}

impl ApiError {
    /// Build a `Response` error from an HTTP error status and decoded body.
    ///
    /// The body's `error` field becomes the message when it is a string;
    /// otherwise the message is `"HTTP {status}: {status_text}"`.
    pub(crate) fn from_status(status: u16, status_text: &str, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}: {status_text}"));
        Self::Response {
            message,
            status,
            body,
        }
    }

    /// Build a `Transport` error from the underlying failure message.
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Response { .. } => ErrorKind::Response,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Unknown => ErrorKind::Unknown,
        }
    }

    /// HTTP status code of the failure. `0` means no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Response { status, .. } => *status,
            Self::Transport { .. } | Self::Unknown => 0,
        }
    }

    /// Human-readable message (same text as `Display`).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured payload carried by the failure.
    ///
    /// `Response` errors return the response body; `Transport` errors return
    /// `{"originalError": <underlying message>}`.
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Response { body, .. } => body.clone(),
            Self::Transport { message } => Some(json!({ "originalError": message })),
            Self::Unknown => None,
        }
    }
}

/// Result type for all API operations.
pub type ApiResult<T> = Result<T, ApiError>;
