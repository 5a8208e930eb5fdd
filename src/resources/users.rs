//! User management endpoints.

use crate::client::{ApiResult, Client};
use crate::config::RequestOptions;
use crate::resources::{
    ApiResponse, CreateUserRequest, ListParams, Paginated, UpdateUserRequest, User, UserUsage,
};

impl Client {
    /// `GET /users` — list users.
    pub async fn list_users(
        &self,
        params: Option<ListParams>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Paginated<User>> {
        let path = format!("/users{}", params.unwrap_or_default().to_query());
        self.get(&path, options).await
    }

    /// `GET /users/{id}` — fetch a single user.
    pub async fn get_user(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<User>> {
        self.get(&format!("/users/{id}"), options).await
    }

    /// `POST /users` — create a user.
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<User>> {
        self.post("/users", Some(request), options).await
    }

    /// `PUT /users/{id}` — update a user.
    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUserRequest,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<User>> {
        self.put(&format!("/users/{id}"), Some(request), options)
            .await
    }

    /// `DELETE /users/{id}` — delete a user.
    pub async fn delete_user(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<User>> {
        self.delete(&format!("/users/{id}"), options).await
    }

    /// `GET /users/{id}/usage` — current usage snapshot for a user.
    pub async fn get_user_usage(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<UserUsage>> {
        self.get(&format!("/users/{id}/usage"), options).await
    }
}
