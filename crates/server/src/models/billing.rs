//! Address, payment method, and subscription domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cyna_core::{AddressId, PaymentMethodId, ProductId, SubscriptionId, SubscriptionStatus, UserId};

/// A saved postal address.
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    /// User-assigned label (e.g., "Home", "Office").
    pub label: String,
    /// First address line.
    pub line1: String,
    /// Second address line.
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country name or ISO code, as entered.
    pub country: String,
    /// Whether this is the user's default address.
    pub is_default: bool,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
    /// When the address was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// One-line rendering used for order snapshots.
    #[must_use]
    pub fn to_snapshot(&self) -> String {
        let mut parts = vec![self.line1.clone()];
        if let Some(line2) = &self.line2 {
            parts.push(line2.clone());
        }
        parts.push(format!("{} {}", self.postal_code, self.city));
        parts.push(self.country.clone());
        parts.join(", ")
    }
}

/// A card stored at the payment provider, mirrored locally.
///
/// Only display data is kept here; the card itself lives at the provider.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethod {
    /// Unique payment method ID.
    pub id: PaymentMethodId,
    /// Owning user.
    pub user_id: UserId,
    /// ID at the payment provider.
    pub provider_method_id: String,
    /// Card brand (e.g., "visa").
    pub brand: String,
    /// Last four digits.
    pub last4: String,
    /// Expiry month (1-12).
    pub exp_month: i16,
    /// Expiry year (four digits).
    pub exp_year: i16,
    /// Whether this is the user's default payment method.
    pub is_default: bool,
    /// When the method was attached.
    pub created_at: DateTime<Utc>,
}

/// A recurring product subscription.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    /// Unique subscription ID.
    pub id: SubscriptionId,
    /// Subscribing user.
    pub user_id: UserId,
    /// Subscribed product.
    pub product_id: ProductId,
    /// Subscription ID at the payment provider.
    pub provider_subscription_id: String,
    /// Lifecycle status.
    pub status: SubscriptionStatus,
    /// End of the currently paid period.
    pub current_period_end: Option<DateTime<Utc>>,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
    /// When the subscription was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_snapshot() {
        let address = Address {
            id: AddressId::new(1),
            user_id: UserId::new(1),
            label: "Home".to_owned(),
            line1: "12 rue de la Paix".to_owned(),
            line2: Some("Apt 4".to_owned()),
            city: "Paris".to_owned(),
            postal_code: "75002".to_owned(),
            country: "France".to_owned(),
            is_default: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(
            address.to_snapshot(),
            "12 rue de la Paix, Apt 4, 75002 Paris, France"
        );
    }
}
