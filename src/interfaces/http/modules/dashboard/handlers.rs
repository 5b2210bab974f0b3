//! Dashboard HTTP handlers (employer-only routes)

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::application::DashboardService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};

use super::dto::DashboardStatsResponse;

#[derive(Clone)]
pub struct DashboardState {
    pub dashboard: Arc<DashboardService>,
}

/// Aggregate lead counts by status plus the overall total.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Lead counts by status", body = ApiResponse<DashboardStatsResponse>),
        (status = 403, description = "Caller is not an employer")
    )
)]
pub async fn lead_stats(
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<DashboardStatsResponse>>, ApiError> {
    let stats = state.dashboard.lead_stats().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(stats.into())))
}
