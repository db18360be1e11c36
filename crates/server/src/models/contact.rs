//! Contact message domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cyna_core::{ContactMessageId, ContactMessageStatus, Email, UserId};

/// A message submitted through the contact form.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    /// Unique message ID.
    pub id: ContactMessageId,
    /// Submitting user, when the sender was logged in.
    pub user_id: Option<UserId>,
    /// Reply-to address.
    pub email: Email,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Handling status.
    pub status: ContactMessageStatus,
    /// Support response, once one was sent.
    pub response: Option<String>,
    /// When the response was sent.
    pub responded_at: Option<DateTime<Utc>>,
    /// When the message was submitted.
    pub created_at: DateTime<Utc>,
}
