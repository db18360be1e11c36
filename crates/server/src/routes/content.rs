//! Marketing content handlers (hero carousel, main message).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cyna_core::{HeroSlideId, MessageSeverity, Permission};

use crate::db::ContentRepository;
use crate::db::content::SlideInput;
use crate::error::AppError;
use crate::middleware::{OptionalAuth, RequireAuth, require_permission};
use crate::models::{HeroCarouselSlide, MainMessage};
use crate::state::AppState;

// =============================================================================
// Hero carousel
// =============================================================================

/// List carousel slides.
///
/// GET /api/hero-carousel
///
/// The public view contains only active slides; staff with
/// `hero-carousel:update` also see inactive ones.
#[instrument(skip(state, auth))]
pub async fn list_slides(
    State(state): State<AppState>,
    auth: OptionalAuth,
) -> Result<Json<Vec<HeroCarouselSlide>>, AppError> {
    let sees_inactive = auth
        .0
        .is_some_and(|u| u.role.has_permission(Permission::HeroCarouselUpdate));

    let slides = ContentRepository::new(state.pool())
        .list_slides(!sees_inactive)
        .await?;
    Ok(Json(slides))
}

/// Form data for creating or replacing a slide.
#[derive(Debug, Deserialize)]
pub struct SlideRequest {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl SlideRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_owned()));
        }
        if self.image_url.trim().is_empty() {
            return Err(AppError::BadRequest("image_url is required".to_owned()));
        }
        Ok(())
    }

    fn as_input(&self) -> SlideInput<'_> {
        SlideInput {
            title: self.title.trim(),
            subtitle: self.subtitle.trim(),
            image_url: self.image_url.trim(),
            link_url: self.link_url.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            sort_order: self.sort_order,
            active: self.active,
        }
    }
}

/// Create a slide.
///
/// POST /api/hero-carousel
#[instrument(skip(state, auth, body), fields(title = %body.title))]
pub async fn create_slide(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<SlideRequest>,
) -> Result<(StatusCode, Json<HeroCarouselSlide>), AppError> {
    require_permission(&auth.0, Permission::HeroCarouselCreate)?;
    body.validate()?;

    let slide = ContentRepository::new(state.pool())
        .create_slide(body.as_input())
        .await?;

    Ok((StatusCode::CREATED, Json(slide)))
}

/// Replace a slide.
///
/// PUT /api/hero-carousel/{id}
#[instrument(skip(state, auth, body))]
pub async fn update_slide(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<SlideRequest>,
) -> Result<Json<HeroCarouselSlide>, AppError> {
    require_permission(&auth.0, Permission::HeroCarouselUpdate)?;
    body.validate()?;

    let slide = ContentRepository::new(state.pool())
        .update_slide(HeroSlideId::new(id), body.as_input())
        .await?;

    Ok(Json(slide))
}

/// Delete a slide.
///
/// DELETE /api/hero-carousel/{id}
#[instrument(skip(state, auth))]
pub async fn delete_slide(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    require_permission(&auth.0, Permission::HeroCarouselDelete)?;

    ContentRepository::new(state.pool())
        .delete_slide(HeroSlideId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Main message
// =============================================================================

/// The active main message.
///
/// GET /api/main-message
///
/// 404 when no message is active.
#[instrument(skip(state))]
pub async fn get_main_message(
    State(state): State<AppState>,
) -> Result<Json<MainMessage>, AppError> {
    let message = ContentRepository::new(state.pool())
        .get_active_message()
        .await?
        .ok_or_else(|| AppError::NotFound("main message".to_owned()))?;

    Ok(Json(message))
}

/// Form data for setting the main message.
#[derive(Debug, Deserialize)]
pub struct MainMessageRequest {
    pub body: String,
    #[serde(default)]
    pub severity: MessageSeverity,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Set the main message; activating deactivates any other.
///
/// PUT /api/main-message
#[instrument(skip(state, auth, body))]
pub async fn set_main_message(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<MainMessageRequest>,
) -> Result<Json<MainMessage>, AppError> {
    require_permission(&auth.0, Permission::MainMessageUpdate)?;

    if body.body.trim().is_empty() {
        return Err(AppError::BadRequest("body is required".to_owned()));
    }

    let message = ContentRepository::new(state.pool())
        .set_message(body.body.trim(), body.severity, body.active)
        .await?;

    Ok(Json(message))
}
