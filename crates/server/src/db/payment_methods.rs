//! Payment method repository.
//!
//! Rows mirror cards held at the payment provider; the provider attach and
//! detach calls happen in the route layer, before these writes.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cyna_core::{PaymentMethodId, UserId};

use super::RepositoryError;
use crate::models::PaymentMethod;

#[derive(Debug, sqlx::FromRow)]
struct PaymentMethodRow {
    id: i32,
    user_id: i32,
    provider_method_id: String,
    brand: String,
    last4: String,
    exp_month: i16,
    exp_year: i16,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        Self {
            id: PaymentMethodId::new(row.id),
            user_id: UserId::new(row.user_id),
            provider_method_id: row.provider_method_id,
            brand: row.brand,
            last4: row.last4,
            exp_month: row.exp_month,
            exp_year: row.exp_year,
            is_default: row.is_default,
            created_at: row.created_at,
        }
    }
}

const METHOD_COLUMNS: &str = "id, user_id, provider_method_id, brand, last4, exp_month, \
                              exp_year, is_default, created_at";

/// Repository for payment method database operations.
pub struct PaymentMethodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentMethodRepository<'a> {
    /// Create a new payment method repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's payment methods, default first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PaymentMethod>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentMethodRow>(&format!(
            "SELECT {METHOD_COLUMNS} FROM payment_methods
             WHERE user_id = $1
             ORDER BY is_default DESC, created_at"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one of a user's payment methods.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        id: PaymentMethodId,
    ) -> Result<Option<PaymentMethod>, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentMethodRow>(&format!(
            "SELECT {METHOD_COLUMNS} FROM payment_methods WHERE id = $1 AND user_id = $2"
        ))
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// The user's default payment method, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_default_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<PaymentMethod>, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentMethodRow>(&format!(
            "SELECT {METHOD_COLUMNS} FROM payment_methods
             WHERE user_id = $1 AND is_default"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Mirror a card attached at the provider.
    ///
    /// When `is_default` is set, the previous default is cleared in the same
    /// transaction. The first method a user adds becomes the default
    /// regardless.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the provider method ID is
    /// already mirrored.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: UserId,
        provider_method_id: &str,
        brand: &str,
        last4: &str,
        exp_month: i16,
        exp_year: i16,
        is_default: bool,
    ) -> Result<PaymentMethod, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payment_methods WHERE user_id = $1")
                .bind(user_id.as_i32())
                .fetch_one(&mut *tx)
                .await?;
        let is_default = is_default || existing == 0;

        if is_default {
            sqlx::query("UPDATE payment_methods SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id.as_i32())
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, PaymentMethodRow>(&format!(
            "INSERT INTO payment_methods
                 (user_id, provider_method_id, brand, last4, exp_month, exp_year, is_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {METHOD_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(provider_method_id)
        .bind(brand)
        .bind(last4)
        .bind(exp_month)
        .bind(exp_year)
        .bind(is_default)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "payment method already attached"))?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Delete one of a user's payment methods.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the method doesn't exist or
    /// belongs to another user.
    pub async fn delete(
        &self,
        user_id: UserId,
        id: PaymentMethodId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = $1 AND user_id = $2")
            .bind(id.as_i32())
            .bind(user_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
