//! Chatbot handler.

use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::services::chatbot::{BotReply, ChatbotService};

/// Visitor message to the chatbot.
#[derive(Debug, Deserialize)]
pub struct BotMessageRequest {
    pub message: String,
}

/// Get a canned reply for a visitor message.
///
/// POST /api/chatbot/messages
#[instrument(skip(body))]
pub async fn message(Json(body): Json<BotMessageRequest>) -> Result<Json<BotReply>, AppError> {
    let text = body.message.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("message is required".to_owned()));
    }

    Ok(Json(ChatbotService::reply(text)))
}
