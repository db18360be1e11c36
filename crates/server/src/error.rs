//! Unified error handling for the API server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::email::EmailError;
use crate::services::payment::PaymentError;

/// Application-level error type.
///
/// Every handler returns `Result<_, AppError>`; the `IntoResponse` impl is
/// the single place HTTP status codes and response bodies are decided.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Payment provider operation failed.
    #[error("payment provider error: {0}")]
    Payment(#[from] PaymentError),

    /// Email delivery failed.
    #[error("email error: {0}")]
    Email(#[from] EmailError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("unauthorized")]
    Unauthorized,

    /// User lacks the required permission.
    #[error("forbidden: requires {0}")]
    Forbidden(cyna_core::Permission),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Uniqueness conflict (e.g. email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // NotFound from the repository layer is a routine 404, not a defect.
        let this = match self {
            Self::Database(RepositoryError::NotFound) => Self::NotFound("resource".to_owned()),
            Self::Database(RepositoryError::Conflict(msg)) => Self::Conflict(msg),
            other => other,
        };

        // Log server errors with Sentry
        if matches!(this, Self::Database(_) | Self::Internal(_) | Self::Email(_)) {
            let event_id = sentry::capture_error(&this);
            tracing::error!(
                error = %this,
                sentry_event_id = %event_id,
                "request error"
            );
        }

        let status = match &this {
            Self::Database(_) | Self::Internal(_) | Self::Email(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        };

        // Don't expose internal error details to clients
        let message = match &this {
            Self::Database(_) | Self::Internal(_) | Self::Email(_) => {
                "internal server error".to_owned()
            }
            Self::Payment(_) => "payment provider error".to_owned(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Set the Sentry user context from a user ID.
pub fn set_sentry_user(user_id: i32, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyna_core::Permission;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("order 123".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::Forbidden(Permission::ContactRespond)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::BadRequest("missing field".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Conflict("email already exists".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_repository_conflict_maps_to_409() {
        assert_eq!(
            status_of(AppError::Database(RepositoryError::Conflict(
                "email already exists".into()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_forbidden_names_permission() {
        let err = AppError::Forbidden(Permission::HeroCarouselCreate);
        assert_eq!(err.to_string(), "forbidden: requires hero-carousel:create");
    }
}
