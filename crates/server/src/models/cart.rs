//! Session-backed cart.
//!
//! The cart lives in the session store, not in a table: it is request-scoped
//! working state that becomes durable only at checkout, when it is converted
//! into an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cyna_core::ProductId;

/// Maximum quantity of a single product per cart line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product in the line.
    pub product_id: ProductId,
    /// Units requested.
    pub quantity: u32,
}

/// The session cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add `quantity` units of a product, merging into an existing line.
    ///
    /// The merged quantity is clamped to [`MAX_LINE_QUANTITY`].
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = (line.quantity + quantity).min(MAX_LINE_QUANTITY);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity: quantity.min(MAX_LINE_QUANTITY),
            });
        }
    }

    /// Set the quantity of a product's line. Zero removes the line.
    ///
    /// Returns `false` if the product has no line (and `quantity` is non-zero).
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity.min(MAX_LINE_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Remove a product's line. Returns `false` if there was none.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Total of the cart given a unit price per line, in line order.
    ///
    /// The caller resolves prices from the catalog; the cart only stores
    /// product IDs and quantities.
    #[must_use]
    pub fn total(&self, unit_prices: &[Decimal]) -> Decimal {
        self.lines
            .iter()
            .zip(unit_prices)
            .map(|(line, price)| *price * Decimal::from(line.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(1), 3);
        cart.add(ProductId::new(2), 1);

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.unit_count(), 6);
    }

    #[test]
    fn test_add_clamps_quantity() {
        let mut cart = Cart::default();
        cart.add(ProductId::new(1), 90);
        cart.add(ProductId::new(1), 90);
        assert_eq!(cart.unit_count(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::default();
        cart.add(ProductId::new(1), 2);
        assert!(cart.set_quantity(ProductId::new(1), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_product() {
        let mut cart = Cart::default();
        assert!(!cart.set_quantity(ProductId::new(7), 3));
    }

    #[test]
    fn test_remove_missing_line() {
        let mut cart = Cart::default();
        cart.add(ProductId::new(1), 1);
        assert!(!cart.remove(ProductId::new(2)));
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::default();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(2), 1);

        let prices = [Decimal::new(1050, 2), Decimal::new(499, 2)];
        assert_eq!(cart.total(&prices), Decimal::new(2599, 2));
    }
}
