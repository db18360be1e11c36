//! Single-use auth token repository (email verification, password reset).
//!
//! Only the SHA-256 hash of a token is stored; the cleartext exists solely
//! in the emailed link. Consuming a token deletes it, so a link works once.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use cyna_core::UserId;

use super::RepositoryError;

/// What a token is good for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auth_token_purpose", rename_all = "snake_case")]
pub enum TokenPurpose {
    VerifyEmail,
    ResetPassword,
}

/// Validity windows per purpose.
impl TokenPurpose {
    #[must_use]
    pub fn ttl(self) -> Duration {
        match self {
            Self::VerifyEmail => Duration::hours(48),
            Self::ResetPassword => Duration::hours(2),
        }
    }
}

/// Repository for auth token database operations.
pub struct TokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TokenRepository<'a> {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a token hash for a user, replacing earlier tokens with the same
    /// purpose.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn store(
        &self,
        user_id: UserId,
        token_hash: &str,
        purpose: TokenPurpose,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1 AND purpose = $2")
            .bind(user_id.as_i32())
            .bind(purpose)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO auth_tokens (user_id, token_hash, purpose, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id.as_i32())
        .bind(token_hash)
        .bind(purpose)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Consume a token: returns the owning user and deletes the row.
    ///
    /// Expired tokens are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no live token matches.
    pub async fn consume(
        &self,
        token_hash: &str,
        purpose: TokenPurpose,
    ) -> Result<UserId, RepositoryError> {
        let user_id: Option<i32> = sqlx::query_scalar(
            "DELETE FROM auth_tokens
             WHERE token_hash = $1 AND purpose = $2 AND expires_at > now()
             RETURNING user_id",
        )
        .bind(token_hash)
        .bind(purpose)
        .fetch_optional(self.pool)
        .await?;

        user_id.map(UserId::new).ok_or(RepositoryError::NotFound)
    }

    /// Delete expired tokens. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn purge_expired(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= now()")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
