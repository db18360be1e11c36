//! Contact message handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cyna_core::{ContactMessageId, ContactMessageStatus, Email, Permission};

use crate::db::ContactMessageRepository;
use crate::error::AppError;
use crate::middleware::{OptionalAuth, RequireAuth, require_permission};
use crate::models::ContactMessage;
use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// Submit a contact message (public).
///
/// POST /api/contact-messages
#[instrument(skip(state, auth, body), fields(email = %body.email))]
pub async fn submit(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Json(body): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError> {
    let email =
        Email::parse(&body.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if body.subject.trim().is_empty() || body.body.trim().is_empty() {
        return Err(AppError::BadRequest(
            "subject and body are required".to_owned(),
        ));
    }

    let message = ContactMessageRepository::new(state.pool())
        .create(
            auth.0.map(|u| u.id),
            &email,
            body.subject.trim(),
            body.body.trim(),
        )
        .await?;

    tracing::info!(message_id = %message.id, "contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

/// Query parameters for message listings.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub status: Option<ContactMessageStatus>,
}

/// List contact messages.
///
/// GET /api/contact-messages?status=
#[instrument(skip(state, auth))]
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    require_permission(&auth.0, Permission::ContactRead)?;

    let messages = ContactMessageRepository::new(state.pool())
        .list(query.status)
        .await?;
    Ok(Json(messages))
}

/// Get a contact message.
///
/// GET /api/contact-messages/{id}
#[instrument(skip(state, auth))]
pub async fn get(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<ContactMessage>, AppError> {
    require_permission(&auth.0, Permission::ContactRead)?;

    let message = ContactMessageRepository::new(state.pool())
        .get_by_id(ContactMessageId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact message {id}")))?;

    Ok(Json(message))
}

/// Response form data.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub response: String,
}

/// Respond to a contact message: store the response and email the sender.
///
/// POST /api/contact-messages/{id}/respond
#[instrument(skip(state, auth, body))]
pub async fn respond(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<RespondRequest>,
) -> Result<Json<ContactMessage>, AppError> {
    require_permission(&auth.0, Permission::ContactRespond)?;

    if body.response.trim().is_empty() {
        return Err(AppError::BadRequest("response is required".to_owned()));
    }

    let repo = ContactMessageRepository::new(state.pool());
    let message = repo
        .get_by_id(ContactMessageId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact message {id}")))?;

    if message.status == ContactMessageStatus::Responded {
        return Err(AppError::Conflict("message already responded".to_owned()));
    }

    let message = repo.respond(message.id, body.response.trim()).await?;

    state
        .email()
        .send_contact_response(message.email.as_str(), &message.subject, body.response.trim())
        .await?;

    tracing::info!(message_id = %message.id, by = %auth.0.id, "contact message responded");
    Ok(Json(message))
}

/// Close a contact message without responding.
///
/// POST /api/contact-messages/{id}/close
#[instrument(skip(state, auth))]
pub async fn close(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<ContactMessage>, AppError> {
    require_permission(&auth.0, Permission::ContactRespond)?;

    let message = ContactMessageRepository::new(state.pool())
        .close(ContactMessageId::new(id))
        .await?;

    Ok(Json(message))
}
