//! Product repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cyna_core::{CategoryId, CurrencyCode, ProductId};

use super::{RepositoryError, parse_currency};
use crate::models::Product;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    category_id: i32,
    name: String,
    description: String,
    unit_price: Decimal,
    currency: String,
    stock_quantity: i32,
    image_url: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            description: row.description,
            unit_price: row.unit_price,
            currency: parse_currency(&row.currency)?,
            stock_quantity: row.stock_quantity,
            image_url: row.image_url,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, category_id, name, description, unit_price, currency, \
                               stock_quantity, image_url, active, created_at, updated_at";

/// Filter for product listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    /// Restrict to one category.
    pub category_id: Option<CategoryId>,
    /// Restrict by active flag.
    pub active: Option<bool>,
    /// Page size (default 50, max 200).
    pub limit: Option<i64>,
    /// Offset into the result set.
    pub offset: Option<i64>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let limit = filter.limit.unwrap_or(50).clamp(1, 200);
        let offset = filter.offset.unwrap_or(0).max(0);

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE ($1::INTEGER IS NULL OR category_id = $1)
               AND ($2::BOOLEAN IS NULL OR active = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.category_id.as_ref().map(CategoryId::as_i32))
        .bind(filter.active)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get several products by ID, in the order given.
    ///
    /// Missing IDs are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        let mut products: Vec<Product> = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<_, _>>()?;
        products.sort_by_key(|p| raw_ids.iter().position(|&id| id == p.id.as_i32()));
        Ok(products)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the category doesn't exist
    /// (FK violation) and `RepositoryError::Database` otherwise.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        category_id: CategoryId,
        name: &str,
        description: &str,
        unit_price: Decimal,
        currency: CurrencyCode,
        stock_quantity: i32,
        image_url: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products
                 (category_id, name, description, unit_price, currency, stock_quantity, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(category_id.as_i32())
        .bind(name)
        .bind(description)
        .bind(unit_price)
        .bind(currency.code())
        .bind(stock_quantity)
        .bind(image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("category does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: ProductId,
        category_id: CategoryId,
        name: &str,
        description: &str,
        unit_price: Decimal,
        currency: CurrencyCode,
        stock_quantity: i32,
        image_url: Option<&str>,
        active: bool,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products
             SET category_id = $1, name = $2, description = $3, unit_price = $4,
                 currency = $5, stock_quantity = $6, image_url = $7, active = $8,
                 updated_at = now()
             WHERE id = $9
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(category_id.as_i32())
        .bind(name)
        .bind(description)
        .bind(unit_price)
        .bind(currency.code())
        .bind(stock_quantity)
        .bind(image_url)
        .bind(active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if orders reference it.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "product is referenced by orders".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
