//! Lead HTTP handlers

use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::LeadService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::{CreateLeadRequest, LeadResponse, UpdateLeadRequest};

#[derive(Clone)]
pub struct LeadsState {
    pub leads: Arc<LeadService>,
}

/// List leads visible to the caller.
///
/// Employers see every lead with the owning manager joined in;
/// managers see only their own.
#[utoipa::path(
    get,
    path = "/api/v1/leads",
    tag = "leads",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Leads visible to the caller", body = ApiResponse<Vec<LeadResponse>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_leads(
    State(state): State<LeadsState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<LeadResponse>>>, ApiError> {
    let views = state
        .leads
        .list(&user.caller())
        .await
        .map_err(domain_error)?;

    let leads = views.into_iter().map(LeadResponse::from).collect();
    Ok(Json(ApiResponse::success(leads)))
}

/// Fetch a single lead by id.
#[utoipa::path(
    get,
    path = "/api/v1/leads/{id}",
    tag = "leads",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Lead id")),
    responses(
        (status = 200, description = "The lead", body = ApiResponse<LeadResponse>),
        (status = 403, description = "Lead belongs to another manager"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn get_lead(
    State(state): State<LeadsState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LeadResponse>>, ApiError> {
    let view = state
        .leads
        .get(&user.caller(), &id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// Create a lead assigned to a manager. Employer-only.
#[utoipa::path(
    post,
    path = "/api/v1/leads",
    tag = "leads",
    security(("bearer_auth" = [])),
    request_body = CreateLeadRequest,
    responses(
        (status = 201, description = "Lead created", body = ApiResponse<LeadResponse>),
        (status = 403, description = "Caller is not an employer"),
        (status = 404, description = "Assigned manager not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_lead(
    State(state): State<LeadsState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateLeadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LeadResponse>>), ApiError> {
    let view = state
        .leads
        .create(&user.caller(), request.into())
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(view.into()))))
}

/// Partially update a lead.
///
/// Managers may only touch their own leads and may not reassign them;
/// employers may update and reassign any lead.
#[utoipa::path(
    put,
    path = "/api/v1/leads/{id}",
    tag = "leads",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Lead id")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Updated lead", body = ApiResponse<LeadResponse>),
        (status = 403, description = "Not allowed on this lead"),
        (status = 404, description = "Lead or target manager not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_lead(
    State(state): State<LeadsState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateLeadRequest>,
) -> Result<Json<ApiResponse<LeadResponse>>, ApiError> {
    let patch = request.into_patch().map_err(domain_error)?;

    let view = state
        .leads
        .update(&user.caller(), &id, patch)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// Delete a lead. Employer-only.
#[utoipa::path(
    delete,
    path = "/api/v1/leads/{id}",
    tag = "leads",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead removed", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an employer"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn delete_lead(
    State(state): State<LeadsState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state
        .leads
        .delete(&user.caller(), &id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success("Lead removed".to_string())))
}
