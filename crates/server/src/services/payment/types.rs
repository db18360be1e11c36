//! Payment provider API response types.

use serde::Deserialize;

/// A customer record at the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderCustomer {
    /// Customer ID (e.g. `cus_...`).
    pub id: String,
    /// Email the customer was created with.
    #[serde(default)]
    pub email: Option<String>,
}

/// Card details on a payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderCard {
    /// Card brand (e.g. "visa").
    pub brand: String,
    /// Last four digits.
    pub last4: String,
    /// Expiry month (1-12).
    pub exp_month: i16,
    /// Expiry year (four digits).
    pub exp_year: i16,
}

/// A payment method at the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPaymentMethod {
    /// Payment method ID (e.g. `pm_...`).
    pub id: String,
    /// Card details, when the method is a card.
    pub card: Option<ProviderCard>,
}

/// A payment intent at the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPaymentIntent {
    /// Intent ID (e.g. `pi_...`).
    pub id: String,
    /// Provider-side status (e.g. "succeeded", "requires_action").
    pub status: String,
    /// Amount in minor units.
    pub amount: i64,
    /// Lowercase currency code.
    pub currency: String,
}

impl ProviderPaymentIntent {
    /// Whether the charge went through.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// A subscription at the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSubscription {
    /// Subscription ID (e.g. `sub_...`).
    pub id: String,
    /// Provider-side status (e.g. "active", "canceled").
    pub status: String,
    /// Unix timestamp of the current period end.
    #[serde(default)]
    pub current_period_end: Option<i64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_deserializes() {
        let json = r#"{"id":"pi_123","status":"succeeded","amount":2599,"currency":"eur"}"#;
        let intent: ProviderPaymentIntent = serde_json::from_str(json).unwrap();
        assert!(intent.succeeded());
        assert_eq!(intent.amount, 2599);
    }

    #[test]
    fn test_payment_method_without_card() {
        let json = r#"{"id":"pm_123"}"#;
        let method: ProviderPaymentMethod = serde_json::from_str(json).unwrap();
        assert!(method.card.is_none());
    }
}
