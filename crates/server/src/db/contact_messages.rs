//! Contact message repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cyna_core::{ContactMessageId, ContactMessageStatus, Email, UserId};

use super::RepositoryError;
use crate::models::ContactMessage;

#[derive(Debug, sqlx::FromRow)]
struct ContactMessageRow {
    id: i32,
    user_id: Option<i32>,
    email: String,
    subject: String,
    body: String,
    status: ContactMessageStatus,
    response: Option<String>,
    responded_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactMessageRow> for ContactMessage {
    type Error = RepositoryError;

    fn try_from(row: ContactMessageRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: ContactMessageId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            email,
            subject: row.subject,
            body: row.body,
            status: row.status,
            response: row.response,
            responded_at: row.responded_at,
            created_at: row.created_at,
        })
    }
}

const MESSAGE_COLUMNS: &str =
    "id, user_id, email, subject, body, status, response, responded_at, created_at";

/// Repository for contact message database operations.
pub struct ContactMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactMessageRepository<'a> {
    /// Create a new contact message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List messages, optionally by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<ContactMessageStatus>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages
             WHERE ($1::contact_message_status IS NULL OR status = $1)
             ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a message by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: ContactMessageId,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Store a newly submitted message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Option<UserId>,
        email: &Email,
        subject: &str,
        body: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "INSERT INTO contact_messages (user_id, email, subject, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(user_id.as_ref().map(UserId::as_i32))
        .bind(email.as_str())
        .bind(subject)
        .bind(body)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Store a response and mark the message responded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message doesn't exist.
    pub async fn respond(
        &self,
        id: ContactMessageId,
        response: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "UPDATE contact_messages
             SET response = $1, status = 'responded', responded_at = now()
             WHERE id = $2
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(response)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Close a message without responding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message doesn't exist.
    pub async fn close(&self, id: ContactMessageId) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "UPDATE contact_messages SET status = 'closed'
             WHERE id = $1
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Count open messages (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_open(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE status = 'open'")
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
