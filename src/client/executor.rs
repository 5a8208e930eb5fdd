//! Outbound request executor.
//!
//! # Responsibilities
//! - Build one HTTP request per invocation from typed parameters
//! - Merge default and per-call headers (per-call wins on collision)
//! - Resolve the per-call timeout against the configured default
//! - Normalize every failure into a single [`ApiError`] shape
//!
//! The executor never retries and never caches. Cache hints in
//! [`RequestOptions`] are carried for an external fetch layer but are not
//! interpreted here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::client::error::{ApiError, ApiResult};
use crate::config::{ClientConfig, RequestOptions};

/// Header carrying the per-call correlation ID on every outbound request.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Typed client for the GateKey API.
///
/// Holds only immutable configuration and a connection pool; cloning is cheap
/// and concurrent use needs no coordination.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client from the given configuration.
    ///
    /// An unparseable base URL is logged but does not fail construction; the
    /// first call through the executor will surface the failure as an
    /// [`ApiError`].
    pub fn new(config: ClientConfig) -> Self {
        if let Err(e) = Url::parse(&config.base_url) {
            tracing::warn!(base_url = %config.base_url, error = %e, "Base URL does not parse");
        }
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<T> {
        self.execute(Method::GET, path, None::<&()>, options).await
    }

    /// Issue a POST request with an optional JSON body.
    pub async fn post<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, body, options).await
    }

    /// Issue a PUT request with an optional JSON body.
    pub async fn put<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, body, options).await
    }

    /// Issue a DELETE request.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<T> {
        self.execute(Method::DELETE, path, None::<&()>, options)
            .await
    }

    /// Perform one outbound call and normalize the result.
    ///
    /// `path` is appended to the configured base address verbatim; double or
    /// missing slashes pass through as constructed.
    pub async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.request_url(path);
        let timeout_ms = self.resolve_timeout(options);
        let request_id = Uuid::new_v4();
        let headers = self.build_headers(options, request_id)?;

        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(headers)
            .timeout(Duration::from_millis(timeout_ms));
        if let Some(b) = body {
            request = request.json(b);
        }

        tracing::debug!(
            method = %method,
            path,
            request_id = %request_id,
            timeout_ms,
            "Dispatching API request"
        );

        // Send errors carry no response in reqwest: anything that is not a
        // construction failure means the request went out and nothing came
        // back, which is the transport case.
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) if e.is_builder() => {
                tracing::error!(url = %url, error = %e, "Request construction failed");
                return Err(ApiError::Unknown);
            }
            Err(e) => return Err(ApiError::transport(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(ApiError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                body,
            ));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Response body did not decode");
            ApiError::Unknown
        })
    }

    fn request_url(&self, path: &str) -> String {
        // Verbatim concatenation: no slash normalization.
        format!("{}{}", self.config.base_url, path)
    }

    fn resolve_timeout(&self, options: Option<&RequestOptions>) -> u64 {
        options
            .and_then(|o| o.timeout_ms)
            .unwrap_or(self.config.timeout_ms)
    }

    /// Merge headers: defaults first, then per-call extras (extras win).
    fn build_headers(
        &self,
        options: Option<&RequestOptions>,
        request_id: Uuid,
    ) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|_| ApiError::Unknown)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(X_REQUEST_ID),
            HeaderValue::from_str(&request_id.to_string()).map_err(|_| ApiError::Unknown)?,
        );

        if let Some(extra) = options.and_then(|o| o.headers.as_ref()) {
            for (name, value) in extra {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| ApiError::Unknown)?;
                let value = HeaderValue::from_str(value).map_err(|_| ApiError::Unknown)?;
                headers.insert(name, value);
            }
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("timeout_ms", &self.config.timeout_ms)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::new(ClientConfig::new("gk_test").with_base_url("http://localhost:4000"))
    }

    #[test]
    fn test_path_appended_verbatim() {
        let client = test_client();
        assert_eq!(
            client.request_url("//keys//k1"),
            "http://localhost:4000//keys//k1"
        );
        assert_eq!(client.request_url("plans"), "http://localhost:4000plans");
    }

    #[test]
    fn test_timeout_resolution() {
        let client = test_client();
        assert_eq!(client.resolve_timeout(None), crate::config::DEFAULT_TIMEOUT_MS);
        let options = RequestOptions::new().timeout_ms(250);
        assert_eq!(client.resolve_timeout(Some(&options)), 250);
    }

    #[test]
    fn test_header_merge_extras_win() {
        let client = test_client();
        let options = RequestOptions::new().header("Content-Type", "text/plain");
        let headers = client
            .build_headers(Some(&options), Uuid::new_v4())
            .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer gk_test");
        assert!(headers.get(X_REQUEST_ID).is_some());
    }

    #[test]
    fn test_invalid_extra_header_is_unknown() {
        let client = test_client();
        let options = RequestOptions::new().header("bad header name", "v");
        let err = client
            .build_headers(Some(&options), Uuid::new_v4())
            .unwrap_err();
        assert_eq!(err.status_code(), 0);
        assert_eq!(err.to_string(), "Unknown error occurred");
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", test_client());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("gk_test"));
    }
}
