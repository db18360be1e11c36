//! Order, line item, and transaction repository.
//!
//! Order creation writes the order, its lines, and the stock decrements in
//! one database transaction: a failure at any point leaves no partial rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cyna_core::{
    CurrencyCode, OrderId, OrderStatus, ProductId, TransactionId, TransactionStatus, UserId,
};

use super::{RepositoryError, parse_currency};
use crate::models::{Order, OrderedProduct, Transaction};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    status: OrderStatus,
    currency: String,
    total: Decimal,
    billing_address: String,
    shipping_address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            status: row.status,
            currency: parse_currency(&row.currency)?,
            total: row.total,
            billing_address: row.billing_address,
            shipping_address: row.shipping_address,
            items: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderedProductRow {
    order_id: i32,
    product_id: i32,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
}

impl From<OrderedProductRow> for OrderedProduct {
    fn from(row: OrderedProductRow) -> Self {
        Self {
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i32,
    order_id: i32,
    provider_intent_id: Option<String>,
    amount: Decimal,
    currency: String,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = RepositoryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TransactionId::new(row.id),
            order_id: OrderId::new(row.order_id),
            provider_intent_id: row.provider_intent_id,
            amount: row.amount,
            currency: parse_currency(&row.currency)?,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, user_id, status, currency, total, billing_address, \
                             shipping_address, created_at, updated_at";

/// A line to write when creating an order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Name snapshot.
    pub product_name: String,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// Units ordered.
    pub quantity: i32,
}

/// A row of the top-products dashboard table.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct TopProduct {
    /// Product ID.
    pub product_id: i32,
    /// Name snapshot from order lines.
    pub product_name: String,
    /// Total units sold.
    pub units_sold: i64,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its lines and decrement stock, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if any line exceeds available
    /// stock (the whole write is rolled back).
    pub async fn create_with_items(
        &self,
        user_id: UserId,
        currency: CurrencyCode,
        total: Decimal,
        billing_address: &str,
        shipping_address: &str,
        items: &[NewOrderItem],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (user_id, currency, total, billing_address, shipping_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(currency.code())
        .bind(total)
        .bind(billing_address)
        .bind(shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        let mut order: Order = row.try_into()?;

        for item in items {
            // Guarded decrement: zero rows affected means insufficient stock.
            let updated = sqlx::query(
                "UPDATE products SET stock_quantity = stock_quantity - $1, updated_at = now()
                 WHERE id = $2 AND stock_quantity >= $1 AND active",
            )
            .bind(item.quantity)
            .bind(item.product_id.as_i32())
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for product {}",
                    item.product_id
                )));
            }

            sqlx::query(
                "INSERT INTO ordered_products
                     (order_id, product_id, product_name, unit_price, quantity)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order.id.as_i32())
            .bind(item.product_id.as_i32())
            .bind(&item.product_name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        order.items = items
            .iter()
            .map(|item| OrderedProduct {
                order_id: order.id,
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect();

        Ok(order)
    }

    /// Get an order by ID, with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut order: Order = row.try_into()?;
        order.items = self.get_items(id).await?;
        Ok(Some(order))
    }

    /// List orders, optionally restricted to one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: Option<UserId>) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE ($1::INTEGER IS NULL OR user_id = $1)
             ORDER BY created_at DESC"
        ))
        .bind(user_id.as_ref().map(UserId::as_i32))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get the lines of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_items(&self, id: OrderId) -> Result<Vec<OrderedProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderedProductRow>(
            "SELECT order_id, product_id, product_name, unit_price, quantity
             FROM ordered_products WHERE order_id = $1 ORDER BY product_id",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Set an order's status.
    ///
    /// Legality of the transition is the caller's concern; this is a plain
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $1, updated_at = now()
             WHERE id = $2
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Record a payment transaction against an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn record_transaction(
        &self,
        order_id: OrderId,
        provider_intent_id: Option<&str>,
        amount: Decimal,
        currency: CurrencyCode,
        status: TransactionStatus,
    ) -> Result<Transaction, RepositoryError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "INSERT INTO transactions (order_id, provider_intent_id, amount, currency, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, order_id, provider_intent_id, amount, currency, status,
                       created_at, updated_at",
        )
        .bind(order_id.as_i32())
        .bind(provider_intent_id)
        .bind(amount)
        .bind(currency.code())
        .bind(status)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List the transactions recorded against an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_transactions(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, order_id, provider_intent_id, amount, currency, status,
                    created_at, updated_at
             FROM transactions WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count of paid-or-fulfilled orders and their summed totals since an
    /// instant (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sales_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<(i64, Decimal), RepositoryError> {
        let row: (i64, Option<Decimal>) = sqlx::query_as(
            "SELECT COUNT(*), SUM(total)
             FROM orders
             WHERE status IN ('paid', 'fulfilled') AND created_at >= $1",
        )
        .bind(since)
        .fetch_one(self.pool)
        .await?;

        Ok((row.0, row.1.unwrap_or_default()))
    }

    /// Top products by units sold since an instant (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_products_since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<TopProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, TopProduct>(
            "SELECT op.product_id, op.product_name, SUM(op.quantity)::BIGINT AS units_sold
             FROM ordered_products op
             JOIN orders o ON o.id = op.order_id
             WHERE o.status IN ('paid', 'fulfilled') AND o.created_at >= $1
             GROUP BY op.product_id, op.product_name
             ORDER BY units_sold DESC
             LIMIT $2",
        )
        .bind(since)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
