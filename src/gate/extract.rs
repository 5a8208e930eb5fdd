//! Credential extraction from inbound request headers.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Resolve the caller's credential from `header_name`, falling back to the
/// standard authorization header when that header is absent.
///
/// A literal `"Bearer "` prefix is stripped when present. The prefix is not
/// validated: a lowercase `"bearer "` or a missing prefix is not rejected,
/// the whole value is taken as the credential verbatim. Current behavior,
/// callers rely on it.
pub(crate) fn extract_credential(headers: &HeaderMap, header_name: &str) -> Option<String> {
    let raw = headers
        .get(header_name)
        .or_else(|| headers.get(AUTHORIZATION))
        .and_then(|v| v.to_str().ok())?;

    let credential = raw.strip_prefix("Bearer ").unwrap_or(raw);
    if credential.is_empty() {
        None
    } else {
        Some(credential.to_string())
    }
}
