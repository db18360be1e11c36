//! Category handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cyna_core::{CategoryId, Permission};

use crate::db::CategoryRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_permission};
use crate::models::Category;
use crate::state::AppState;

/// List all categories.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(categories))
}

/// Get a category by ID.
///
/// GET /api/categories/{id}
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryRepository::new(state.pool())
        .get_by_id(CategoryId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(Json(category))
}

/// Form data for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl CategoryRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_owned()));
        }
        Ok(())
    }
}

/// Create a category.
///
/// POST /api/categories
#[instrument(skip(state, auth, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    require_permission(&auth.0, Permission::CategoryCreate)?;
    body.validate()?;

    let category = CategoryRepository::new(state.pool())
        .create(
            body.name.trim(),
            body.description.trim(),
            body.image_url.as_deref(),
            body.sort_order,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category.
///
/// PUT /api/categories/{id}
#[instrument(skip(state, auth, body))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    require_permission(&auth.0, Permission::CategoryUpdate)?;
    body.validate()?;

    let category = CategoryRepository::new(state.pool())
        .update(
            CategoryId::new(id),
            body.name.trim(),
            body.description.trim(),
            body.image_url.as_deref(),
            body.sort_order,
        )
        .await?;

    Ok(Json(category))
}

/// Delete a category.
///
/// DELETE /api/categories/{id}
#[instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    require_permission(&auth.0, Permission::CategoryDelete)?;

    CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
