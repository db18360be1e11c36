//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use cyna_core::{CurrencyCode, OrderId, OrderStatus, ProductId, TransactionId, TransactionStatus, UserId};

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Order currency.
    pub currency: CurrencyCode,
    /// Order total.
    pub total: Decimal,
    /// Billing address snapshot (one line, as entered at checkout).
    pub billing_address: String,
    /// Shipping address snapshot.
    pub shipping_address: String,
    /// Line items. Empty unless loaded with the order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderedProduct>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line item on an order.
///
/// Product name and price are snapshots taken at checkout so later catalog
/// edits never rewrite order history.
#[derive(Debug, Clone, Serialize)]
pub struct OrderedProduct {
    /// Order the line belongs to.
    pub order_id: OrderId,
    /// Product that was ordered.
    pub product_id: ProductId,
    /// Product name at checkout time.
    pub product_name: String,
    /// Unit price at checkout time.
    pub unit_price: Decimal,
    /// Units ordered.
    pub quantity: i32,
}

/// A payment transaction against an order.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Unique transaction ID.
    pub id: TransactionId,
    /// Order being paid.
    pub order_id: OrderId,
    /// Payment intent ID at the provider, if one was created.
    pub provider_intent_id: Option<String>,
    /// Charged amount.
    pub amount: Decimal,
    /// Charge currency.
    pub currency: CurrencyCode,
    /// Outcome at the provider.
    pub status: TransactionStatus,
    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last updated.
    pub updated_at: DateTime<Utc>,
}
