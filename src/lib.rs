//! GateKey Rust SDK
//!
//! Typed async client for the GateKey API-key / plan / user / rate-limit
//! management service, plus request-gating adapters for axum services.
//!
//! # Architecture Overview
//!
//! ```text
//!  application code                          GateKey API
//!  ───────────────                           ───────────
//!  resources (keys/plans/users/validate)
//!      → client::executor ─────────────────▶ GET/POST/PUT/DELETE ...
//!        (headers, timeout, one call)   ◀──── {success, data?, error?}
//!      → client::error (normalize failures)
//!
//!  inbound request
//!      → gate::extract (bearer credential)
//!      → gate::middleware / gate::wrap ────▶ POST /validate
//!        401 | 429 | 500 | delegate     ◀──── {allowed, details?}
//! ```
//!
//! The executor performs exactly one outbound call per invocation and maps
//! every failure into a single [`ApiError`] shape. The gate adapters call the
//! validation endpoint before delegating to caller-supplied logic and never
//! let a validation error escape to their caller.

// Core subsystems
pub mod client;
pub mod config;
pub mod resources;

// Request gating
pub mod gate;

pub use client::{ApiError, ApiResult, Client, ErrorKind};
pub use config::{CacheHint, ClientConfig, RequestOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use gate::{require_api_key, wrap, Gate, GateError, GateOptions};
pub use resources::{ApiResponse, Paginated, UsageDetails, ValidationOutcome};
