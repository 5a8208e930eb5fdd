//! Configuration schema definitions.
//!
//! All types derive Serde traits so hosting applications can deserialize them
//! from their own config files if they want to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default base address of the GateKey API.
pub const DEFAULT_BASE_URL: &str = "https://api.gatekey.dev/v1";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Immutable client configuration.
///
/// Captured once by [`crate::Client::new`]; every outbound call reads from it
/// but nothing writes to it after construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API key sent as `Authorization: Bearer <key>` on every call.
    pub api_key: String,

    /// Base address the request path is appended to, verbatim.
    pub base_url: String,

    /// Request timeout in milliseconds (per-call options may override).
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a configuration with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the base address (e.g. a self-hosted deployment).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Per-call request options.
///
/// Built by the caller for a single invocation and merged with the client
/// configuration at call time; never stored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Overrides `ClientConfig::timeout_ms` for this call only.
    pub timeout_ms: Option<u64>,

    /// Extra headers; on key collision these win over the defaults.
    pub headers: Option<HashMap<String, String>>,

    /// Cache hint forwarded to a caller-side fetch cache. Inert here: the
    /// executor carries it but never interprets it.
    pub cache: Option<CacheHint>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a per-call timeout in milliseconds.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Add a header for this call only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Attach a cache hint for an external caching layer.
    pub fn cache(mut self, hint: CacheHint) -> Self {
        self.cache = Some(hint);
        self
    }
}

/// Opaque cache hint for an external fetch/caching layer.
///
/// The executor accepts and carries these flags but performs no caching of
/// its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheHint {
    /// Cache mode understood by the external layer (e.g. "no-store").
    pub mode: Option<String>,

    /// Revalidation window in seconds.
    pub revalidate_secs: Option<u64>,
}
