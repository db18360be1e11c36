//! Registration, email verification, and password reset handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Response for registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i32,
    pub email: String,
}

/// Register a new user and send the verification link.
///
/// POST /api/auth/register
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first_name and last_name are required".to_owned(),
        ));
    }

    let auth = AuthService::new(state.pool());
    let user = auth
        .register(
            &body.email,
            &body.password,
            body.first_name.trim(),
            body.last_name.trim(),
        )
        .await
        .map_err(map_auth_error)?;

    let token = auth
        .issue_verification_token(user.id)
        .await
        .map_err(map_auth_error)?;

    let link = format!(
        "{}/api/auth/verify-email?token={token}",
        state.config().base_url
    );
    // Registration already succeeded; a failed send is logged, not fatal.
    if let Err(e) = state
        .email()
        .send_verification_link(user.email.as_str(), &link)
        .await
    {
        tracing::error!(error = %e, user_id = %user.id, "failed to send verification email");
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id.as_i32(),
            email: user.email.to_string(),
        }),
    ))
}

/// Query parameters for email verification.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// Generic ok response.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Consume an email-verification token.
///
/// GET /api/auth/verify-email?token=
#[instrument(skip(state, query))]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<OkResponse>, AppError> {
    AuthService::new(state.pool())
        .verify_email(&query.token)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(OkResponse { ok: true }))
}

/// Password reset request form data.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Start a password reset.
///
/// POST /api/auth/password-reset/request
///
/// Always responds 200 so the endpoint cannot be used to probe for
/// registered addresses.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.start_password_reset(&body.email).await {
        Ok(Some((user, token))) => {
            let link = format!(
                "{}/api/auth/password-reset/confirm?token={token}",
                state.config().base_url
            );
            if let Err(e) = state
                .email()
                .send_password_reset_link(user.email.as_str(), &link)
                .await
            {
                tracing::error!(error = %e, user_id = %user.id, "failed to send reset email");
            }
        }
        Ok(None) => {
            tracing::info!("password reset requested for unknown address");
        }
        Err(AuthError::InvalidEmail(e)) => {
            return Err(AppError::BadRequest(e.to_string()));
        }
        Err(e) => return Err(map_auth_error(e)),
    }

    Ok(Json(OkResponse { ok: true }))
}

/// Password reset confirmation form data.
#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

/// Consume a reset token and set the new password.
///
/// POST /api/auth/password-reset/confirm
#[instrument(skip(state, body))]
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetConfirm>,
) -> Result<Json<OkResponse>, AppError> {
    AuthService::new(state.pool())
        .reset_password(&body.token, &body.new_password)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(OkResponse { ok: true }))
}

/// Map auth service errors onto HTTP-facing errors.
pub(crate) fn map_auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::InvalidEmail(e) => AppError::BadRequest(e.to_string()),
        AuthError::WeakPassword(msg) => AppError::BadRequest(msg),
        AuthError::UserAlreadyExists => AppError::Conflict("email already registered".to_owned()),
        AuthError::InvalidCredentials => AppError::Unauthorized,
        AuthError::InvalidToken => AppError::BadRequest("invalid or expired token".to_owned()),
        AuthError::UserNotFound => AppError::NotFound("user".to_owned()),
        AuthError::Repository(e) => AppError::Database(e),
        AuthError::PasswordHash => AppError::Internal("password hashing failed".to_owned()),
    }
}
