//! Payment provider API client.
//!
//! Speaks a Stripe-style REST API: form-encoded requests, JSON responses,
//! bearer authentication with the secret key. The base URL is configurable
//! so tests can point the client at a stub server.

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::PaymentConfig;

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the provider.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unauthorized (invalid API key).
    #[error("Unauthorized: invalid API key")]
    Unauthorized,
}

/// Payment provider API client.
#[derive(Clone)]
pub struct PaymentClient {
    inner: Arc<PaymentClientInner>,
}

struct PaymentClientInner {
    client: reqwest::Client,
    api_base: String,
}

impl PaymentClient {
    /// Create a new payment provider client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| PaymentError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(PaymentClientInner {
                client,
                api_base: config.api_base.trim_end_matches('/').to_owned(),
            }),
        })
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Create a customer record for a user.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` on HTTP or API failure.
    pub async fn create_customer(
        &self,
        email: &str,
        name: &str,
    ) -> Result<ProviderCustomer, PaymentError> {
        self.post("/customers", &[("email", email), ("name", name)])
            .await
    }

    // =========================================================================
    // Payment methods
    // =========================================================================

    /// Attach a payment method to a customer.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotFound` if the method ID is unknown.
    pub async fn attach_payment_method(
        &self,
        method_id: &str,
        customer_id: &str,
    ) -> Result<ProviderPaymentMethod, PaymentError> {
        self.post(
            &format!("/payment_methods/{method_id}/attach"),
            &[("customer", customer_id)],
        )
        .await
    }

    /// Detach a payment method from its customer.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotFound` if the method ID is unknown.
    pub async fn detach_payment_method(
        &self,
        method_id: &str,
    ) -> Result<ProviderPaymentMethod, PaymentError> {
        self.post(&format!("/payment_methods/{method_id}/detach"), &[])
            .await
    }

    // =========================================================================
    // Payment intents
    // =========================================================================

    /// Create and confirm a payment intent for an off-session charge.
    ///
    /// `amount` is in minor units (cents).
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the provider rejects the charge.
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        customer_id: &str,
        method_id: &str,
    ) -> Result<ProviderPaymentIntent, PaymentError> {
        let amount = amount.to_string();
        let currency = currency.to_lowercase();

        self.post(
            "/payment_intents",
            &[
                ("amount", amount.as_str()),
                ("currency", currency.as_str()),
                ("customer", customer_id),
                ("payment_method", method_id),
                ("confirm", "true"),
                ("off_session", "true"),
            ],
        )
        .await
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Cancel a subscription at the provider.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotFound` if the subscription ID is unknown.
    pub async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<ProviderSubscription, PaymentError> {
        let url = format!("{}/subscriptions/{subscription_id}", self.inner.api_base);
        let response = self.inner.client.delete(&url).send().await?;
        self.handle_response(response).await
    }

    /// Execute a form-encoded POST request.
    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, PaymentError> {
        let url = format!("{}{path}", self.inner.api_base);
        let response = self.inner.client.post(&url).form(form).send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| PaymentError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Parse an error response from the provider.
    async fn parse_error(&self, response: reqwest::Response) -> PaymentError {
        let status = response.status().as_u16();

        // Check for rate limiting
        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return PaymentError::RateLimited(retry_after);
        }

        if status == 401 || status == 403 {
            return PaymentError::Unauthorized;
        }

        if status == 404 {
            return PaymentError::NotFound("Resource not found".to_string());
        }

        // Try to parse the provider's error message from the body
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| {
                serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| {
                        v.pointer("/error/message")
                            .and_then(|m| m.as_str())
                            .map(ToOwned::to_owned)
                    })
                    .or(Some(body))
            })
            .unwrap_or_else(|| "Unknown error".to_string());

        PaymentError::Api { status, message }
    }
}

impl std::fmt::Debug for PaymentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentClient")
            .field("api_base", &self.inner.api_base)
            .finish_non_exhaustive()
    }
}
