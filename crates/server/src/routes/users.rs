//! User administration handlers.
//!
//! All routes here are gated by `user:*` permissions; self-service profile
//! access goes through `/api/sessions/current` instead.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cyna_core::{Permission, Role, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_permission};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// JSON view of a user (never exposes the password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub email_verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i32(),
            email: user.email.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// List all users.
///
/// GET /api/users
#[instrument(skip(state, auth))]
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    require_permission(&auth.0, Permission::UserRead)?;

    let users = UserRepository::new(state.pool()).list_all().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get a user by ID.
///
/// GET /api/users/{id}
#[instrument(skip(state, auth))]
pub async fn get(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    require_permission(&auth.0, Permission::UserRead)?;

    let user = UserRepository::new(state.pool())
        .get_by_id(UserId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    Ok(Json(user.into()))
}

/// Form data for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Create a user (typically back-office staff).
///
/// POST /api/users
#[instrument(skip(state, auth, body), fields(email = %body.email, role = %body.role))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    require_permission(&auth.0, Permission::UserCreate)?;

    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first_name and last_name are required".to_owned(),
        ));
    }

    // Registration path validates email and password strength.
    let user = AuthService::new(state.pool())
        .register(
            &body.email,
            &body.password,
            body.first_name.trim(),
            body.last_name.trim(),
        )
        .await
        .map_err(super::auth::map_auth_error)?;

    // Role is assigned after creation; register() always creates clients.
    let user = if body.role == Role::Client {
        user
    } else {
        UserRepository::new(state.pool())
            .update_role(user.id, body.role)
            .await?
    };

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Form data for updating a user.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Update a user's profile and role.
///
/// PUT /api/users/{id}
#[instrument(skip(state, auth, body))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    require_permission(&auth.0, Permission::UserUpdate)?;

    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first_name and last_name are required".to_owned(),
        ));
    }

    let repo = UserRepository::new(state.pool());
    let id = UserId::new(id);

    repo.update_profile(id, body.first_name.trim(), body.last_name.trim())
        .await?;
    let user = repo.update_role(id, body.role).await?;

    Ok(Json(user.into()))
}

/// Delete a user.
///
/// DELETE /api/users/{id}
#[instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    require_permission(&auth.0, Permission::UserDelete)?;

    if auth.0.id.as_i32() == id {
        return Err(AppError::BadRequest(
            "cannot delete your own account".to_owned(),
        ));
    }

    UserRepository::new(state.pool())
        .delete(UserId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
