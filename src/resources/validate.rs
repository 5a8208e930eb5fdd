//! Credential validation endpoint.

use serde::Serialize;

use crate::client::{ApiResult, Client};
use crate::resources::ValidationOutcome;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    api_key: &'a str,
    path: &'a str,
    method: &'a str,
}

impl Client {
    /// Ask the API whether `credential` may perform `method` on `path`.
    ///
    /// This is the call both gate adapters branch on. One outbound request,
    /// no caching of the decision.
    pub async fn validate(
        &self,
        credential: &str,
        path: &str,
        method: &str,
    ) -> ApiResult<ValidationOutcome> {
        let body = ValidateRequest {
            api_key: credential,
            path,
            method,
        };
        self.post("/validate", Some(&body), None).await
    }
}
