//! Session handlers: login, logout, current user.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::RequireAuth;
use crate::middleware::auth::{clear_session, set_current_user};
use crate::models::CurrentUser;
use crate::routes::auth::map_auth_error;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login with email and password.
///
/// POST /api/sessions
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<CurrentUser>), AppError> {
    let user = AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await
        .map_err(map_auth_error)?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "user logged in");

    Ok((StatusCode::CREATED, Json(current)))
}

/// Logout: destroy the session.
///
/// DELETE /api/sessions
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_session(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in user's identity.
///
/// GET /api/sessions/current
pub async fn current(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
