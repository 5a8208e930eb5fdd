//! API key management endpoints.

use crate::client::{ApiResult, Client};
use crate::config::RequestOptions;
use crate::resources::{
    ApiKey, ApiResponse, CreateKeyRequest, ListParams, Paginated, UpdateKeyRequest,
};

impl Client {
    /// `GET /keys` — list issued keys.
    pub async fn list_keys(
        &self,
        params: Option<ListParams>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Paginated<ApiKey>> {
        let path = format!("/keys{}", params.unwrap_or_default().to_query());
        self.get(&path, options).await
    }

    /// `GET /keys/{id}` — fetch a single key.
    pub async fn get_key(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<ApiKey>> {
        self.get(&format!("/keys/{id}"), options).await
    }

    /// `POST /keys` — issue a new key.
    pub async fn create_key(
        &self,
        request: &CreateKeyRequest,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<ApiKey>> {
        self.post("/keys", Some(request), options).await
    }

    /// `PUT /keys/{id}` — update a key.
    pub async fn update_key(
        &self,
        id: &str,
        request: &UpdateKeyRequest,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<ApiKey>> {
        self.put(&format!("/keys/{id}"), Some(request), options)
            .await
    }

    /// `POST /keys/{id}/revoke` — deactivate a key without deleting it.
    pub async fn revoke_key(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<ApiKey>> {
        self.post::<_, ()>(&format!("/keys/{id}/revoke"), None, options)
            .await
    }

    /// `DELETE /keys/{id}` — delete a key.
    pub async fn delete_key(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<ApiKey>> {
        self.delete(&format!("/keys/{id}"), options).await
    }
}
