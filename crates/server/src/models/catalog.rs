//! Catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use cyna_core::{CategoryId, CurrencyCode, ProductId};

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category name (unique).
    pub name: String,
    /// Description shown on category pages.
    pub description: String,
    /// Optional illustration.
    pub image_url: Option<String>,
    /// Position in category listings.
    pub sort_order: i32,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A sellable product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Category the product belongs to.
    pub category_id: CategoryId,
    /// Product name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price amount.
    pub unit_price: Decimal,
    /// Price currency.
    pub currency: CurrencyCode,
    /// Units currently in stock.
    pub stock_quantity: i32,
    /// Optional product image.
    pub image_url: Option<String>,
    /// Whether the product is purchasable.
    pub active: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether `quantity` units can currently be sold.
    #[must_use]
    pub const fn can_sell(&self, quantity: u32) -> bool {
        self.active && self.stock_quantity >= quantity as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(active: bool, stock: i32) -> Product {
        Product {
            id: ProductId::new(1),
            category_id: CategoryId::new(1),
            name: "EDR Sentinel".to_owned(),
            description: String::new(),
            unit_price: Decimal::new(4999, 2),
            currency: CurrencyCode::EUR,
            stock_quantity: stock,
            image_url: None,
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_sell_respects_stock() {
        assert!(product(true, 5).can_sell(5));
        assert!(!product(true, 5).can_sell(6));
    }

    #[test]
    fn test_can_sell_requires_active() {
        assert!(!product(false, 100).can_sell(1));
    }
}
