//! Authentication HTTP handlers

use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};

use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::verify_password;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::{LoginRequest, LoginResponse, UserInfo};

#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

fn invalid_credentials() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("Invalid email or password")),
    )
}

/// Exchange email/password credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = state
        .repos
        .users()
        .find_by_email(&request.email)
        .await
        .map_err(domain_error)?;

    // Same response for unknown email and wrong password.
    let Some(user) = user else {
        warn!(email = %request.email, "login attempt for unknown email");
        return Err(invalid_credentials());
    };

    let password_ok =
        verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_ok {
        warn!(user_id = %user.id, "login attempt with wrong password");
        return Err(invalid_credentials());
    }

    let token = create_token(&user.id, &user.name, &user.role.to_string(), &state.jwt_config)
        .map_err(|e| {
            tracing::error!("token creation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        })?;

    info!(user_id = %user.id, role = %user.role, "user logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo::from(&user),
    })))
}

/// The account behind the presented token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn me(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth.user_id)
        .await
        .map_err(domain_error)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("user not found")),
        ));
    };

    Ok(Json(ApiResponse::success(UserInfo::from(&user))))
}
