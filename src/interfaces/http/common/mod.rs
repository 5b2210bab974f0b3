//! Shared HTTP plumbing: response envelope, error mapping, extractors

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response wrapper.
///
/// Every REST endpoint returns data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain error to a transport response.
///
/// Storage failures are logged with full detail here and surfaced to the
/// caller as an opaque server error; everything else passes its message
/// through.
pub fn domain_error(err: DomainError) -> ApiError {
    let (status, message) = match &err {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        DomainError::Storage(detail) => {
            error!("storage failure: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        let (status, _) = domain_error(DomainError::not_found("lead", "x"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = domain_error(DomainError::Forbidden("nope".into()));
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = domain_error(DomainError::Validation("bad".into()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = domain_error(DomainError::Conflict("taken".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = domain_error(DomainError::Unauthorized("who".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn storage_detail_is_not_leaked() {
        let (status, body) = domain_error(DomainError::Storage("connection refused".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0.error.as_deref(), Some("Internal server error"));
    }
}
