//! Manager HTTP handlers (employer-only routes)

use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::Json;

use crate::application::ManagerService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::{ManagerResponse, UpdateManagerRequest};

#[derive(Clone)]
pub struct ManagersState {
    pub managers: Arc<ManagerService>,
}

/// List all manager accounts, sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1/managers",
    tag = "managers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All managers", body = ApiResponse<Vec<ManagerResponse>>),
        (status = 403, description = "Caller is not an employer")
    )
)]
pub async fn list_managers(
    State(state): State<ManagersState>,
) -> Result<Json<ApiResponse<Vec<ManagerResponse>>>, ApiError> {
    let managers = state.managers.list().await.map_err(domain_error)?;
    let managers = managers.into_iter().map(ManagerResponse::from).collect();
    Ok(Json(ApiResponse::success(managers)))
}

/// Update a manager's name and/or email.
#[utoipa::path(
    put,
    path = "/api/v1/managers/{id}",
    tag = "managers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manager id")),
    request_body = UpdateManagerRequest,
    responses(
        (status = 200, description = "Updated manager", body = ApiResponse<ManagerResponse>),
        (status = 404, description = "Manager not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_manager(
    State(state): State<ManagersState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateManagerRequest>,
) -> Result<Json<ApiResponse<ManagerResponse>>, ApiError> {
    let manager = state
        .managers
        .update(&user.caller(), &id, request.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(manager.into())))
}

/// Delete a manager account.
///
/// Leads owned by the manager are not cascaded; they remain visible to
/// employers for reassignment.
#[utoipa::path(
    delete,
    path = "/api/v1/managers/{id}",
    tag = "managers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manager id")),
    responses(
        (status = 200, description = "Manager removed", body = ApiResponse<String>),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn delete_manager(
    State(state): State<ManagersState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state
        .managers
        .delete(&user.caller(), &id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success("Manager removed".to_string())))
}
