//! Subscription repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cyna_core::{ProductId, SubscriptionId, SubscriptionStatus, UserId};

use super::RepositoryError;
use crate::models::Subscription;

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    provider_subscription_id: String,
    status: SubscriptionStatus,
    current_period_end: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: SubscriptionId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            provider_subscription_id: row.provider_subscription_id,
            status: row.status,
            current_period_end: row.current_period_end,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, product_id, provider_subscription_id, status, \
                                    current_period_end, created_at, updated_at";

/// Repository for subscription database operations.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's subscriptions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions
             WHERE user_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one of a user's subscriptions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1 AND user_id = $2"
        ))
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record a subscription created at the provider.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the provider subscription is
    /// already mirrored.
    pub async fn create(
        &self,
        user_id: UserId,
        product_id: ProductId,
        provider_subscription_id: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<Subscription, RepositoryError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "INSERT INTO subscriptions
                 (user_id, product_id, provider_subscription_id, current_period_end)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBSCRIPTION_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .bind(provider_subscription_id)
        .bind(current_period_end)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "subscription already exists"))?;

        Ok(row.into())
    }

    /// Set a subscription's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subscription doesn't exist.
    pub async fn set_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<Subscription, RepositoryError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "UPDATE subscriptions SET status = $1, updated_at = now()
             WHERE id = $2
             RETURNING {SUBSCRIPTION_COLUMNS}"
        ))
        .bind(status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
