//! Plan management endpoints.

use crate::client::{ApiResult, Client};
use crate::config::RequestOptions;
use crate::resources::{ApiResponse, CreatePlanRequest, ListParams, Paginated, Plan, UpdatePlanRequest};

impl Client {
    /// `GET /plans` — list plans.
    pub async fn list_plans(
        &self,
        params: Option<ListParams>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Paginated<Plan>> {
        let path = format!("/plans{}", params.unwrap_or_default().to_query());
        self.get(&path, options).await
    }

    /// `GET /plans/{id}` — fetch a single plan.
    pub async fn get_plan(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Plan>> {
        self.get(&format!("/plans/{id}"), options).await
    }

    /// `POST /plans` — create a plan.
    pub async fn create_plan(
        &self,
        request: &CreatePlanRequest,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Plan>> {
        self.post("/plans", Some(request), options).await
    }

    /// `PUT /plans/{id}` — update a plan.
    pub async fn update_plan(
        &self,
        id: &str,
        request: &UpdatePlanRequest,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Plan>> {
        self.put(&format!("/plans/{id}"), Some(request), options)
            .await
    }

    /// `DELETE /plans/{id}` — delete a plan.
    pub async fn delete_plan(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Plan>> {
        self.delete(&format!("/plans/{id}"), options).await
    }
}
