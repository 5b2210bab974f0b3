//! Authentication and role-gate middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::user::{require_role, Caller, UserRole};
use crate::infrastructure::crypto::jwt::{verify_token, Claims, JwtConfig};

/// Authentication state for the middleware layer
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Build from verified claims. Fails when the role claim is not one
    /// of the known roles, which is treated as an invalid token.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        Some(Self {
            user_id: claims.sub.clone(),
            name: claims.name.clone(),
            role: UserRole::parse(&claims.role)?,
        })
    }

    /// The identity/role pair the services operate on.
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id.clone(), self.role)
    }
}

/// Authentication failures surfaced by this layer
#[derive(Debug, Clone)]
enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires valid token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }

            let Some(user) = AuthenticatedUser::from_claims(&claims) else {
                return auth_error_response(AuthError::InvalidToken);
            };
            request.extensions_mut().insert(user);

            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Employer-only middleware - must be layered after `auth_middleware`.
///
/// Coarse route-level filter; services still run their own per-resource
/// checks behind it.
pub async fn employer_middleware(request: Request<Body>, next: Next) -> Response {
    let user = request.extensions().get::<AuthenticatedUser>();

    match user {
        Some(user) => match require_role(&[UserRole::Employer], user.role) {
            Ok(()) => next.run(request).await,
            Err(_) => auth_error_response(AuthError::InsufficientPermissions),
        },
        None => auth_error_response(AuthError::MissingToken),
    }
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}

// ── Tests ──────────────────────────────────────────────────────
