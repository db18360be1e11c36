//! Checkout: session cart to order, charge, transaction record.
//!
//! The order, its lines, and the stock decrements are one database
//! transaction. The provider charge happens after that commit: a declined
//! charge leaves the order `pending` with a `failed` transaction recorded,
//! and the caller keeps the cart.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use cyna_core::{CurrencyCode, OrderStatus, ProductId, TransactionStatus};

use crate::db::orders::NewOrderItem;
use crate::db::{
    OrderRepository, PaymentMethodRepository, ProductRepository, RepositoryError, UserRepository,
};
use crate::models::{Cart, Order, User};
use crate::services::payment::{PaymentClient, PaymentError};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line references a product that is missing, inactive, or
    /// short on stock.
    #[error("product {0} is unavailable in the requested quantity")]
    ProductUnavailable(ProductId),

    /// Stock moved between pricing and the order write.
    #[error("stock changed during checkout")]
    StockChanged,

    /// Cart lines mix currencies; one order has one currency.
    #[error("cart mixes currencies")]
    CurrencyMismatch,

    /// The user has no payment method on file.
    #[error("no payment method on file")]
    NoPaymentMethod,

    /// The provider declined or errored; the order stays pending.
    #[error("payment failed for order {order_id}: {source}")]
    PaymentDeclined {
        order_id: cyna_core::OrderId,
        #[source]
        source: PaymentError,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Provider error before an order existed.
    #[error("payment provider error: {0}")]
    Payment(#[from] PaymentError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    payment: &'a PaymentClient,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, payment: &'a PaymentClient) -> Self {
        Self { pool, payment }
    }

    /// Convert the cart into a paid order.
    ///
    /// On success the returned order is `paid` and has a `succeeded`
    /// transaction. The caller is responsible for clearing the session cart.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]; on `PaymentDeclined` an order exists but is
    /// still `pending`.
    #[instrument(skip(self, user, cart), fields(user_id = %user.id, lines = cart.lines.len()))]
    pub async fn checkout(
        &self,
        user: &User,
        cart: &Cart,
        billing_address: &str,
        shipping_address: &str,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let (items, currency, total) = self.price_cart(cart).await?;

        let method = PaymentMethodRepository::new(self.pool)
            .get_default_for_user(user.id)
            .await?
            .ok_or(CheckoutError::NoPaymentMethod)?;

        let customer_id = self.ensure_provider_customer(user).await?;

        let orders = OrderRepository::new(self.pool);
        let order = orders
            .create_with_items(
                user.id,
                currency,
                total,
                billing_address,
                shipping_address,
                &items,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CheckoutError::StockChanged,
                other => CheckoutError::Repository(other),
            })?;

        let amount = cyna_core::Price::new(total, currency).as_minor_units();
        let intent = self
            .payment
            .create_payment_intent(amount, currency.code(), &customer_id, &method.provider_method_id)
            .await;

        match intent {
            Ok(intent) if intent.succeeded() => {
                orders
                    .record_transaction(
                        order.id,
                        Some(&intent.id),
                        total,
                        currency,
                        TransactionStatus::Succeeded,
                    )
                    .await?;
                let mut paid = orders.set_status(order.id, OrderStatus::Paid).await?;
                paid.items = order.items;
                tracing::info!(order_id = %paid.id, %total, "checkout completed");
                Ok(paid)
            }
            Ok(intent) => {
                orders
                    .record_transaction(
                        order.id,
                        Some(&intent.id),
                        total,
                        currency,
                        TransactionStatus::Failed,
                    )
                    .await?;
                tracing::warn!(order_id = %order.id, status = %intent.status, "charge not completed");
                Err(CheckoutError::PaymentDeclined {
                    order_id: order.id,
                    source: PaymentError::Api {
                        status: 402,
                        message: format!("intent status {}", intent.status),
                    },
                })
            }
            Err(e) => {
                orders
                    .record_transaction(order.id, None, total, currency, TransactionStatus::Failed)
                    .await?;
                tracing::warn!(order_id = %order.id, error = %e, "provider call failed");
                Err(CheckoutError::PaymentDeclined {
                    order_id: order.id,
                    source: e,
                })
            }
        }
    }

    /// Resolve cart lines against the catalog: availability, one currency,
    /// snapshot prices, total.
    async fn price_cart(
        &self,
        cart: &Cart,
    ) -> Result<(Vec<NewOrderItem>, CurrencyCode, Decimal), CheckoutError> {
        let ids: Vec<ProductId> = cart.lines.iter().map(|l| l.product_id).collect();
        let products = ProductRepository::new(self.pool).get_many(&ids).await?;

        let mut items = Vec::with_capacity(cart.lines.len());
        let mut currency: Option<CurrencyCode> = None;
        let mut total = Decimal::ZERO;

        for line in &cart.lines {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or(CheckoutError::ProductUnavailable(line.product_id))?;

            if !product.can_sell(line.quantity) {
                return Err(CheckoutError::ProductUnavailable(product.id));
            }

            match currency {
                None => currency = Some(product.currency),
                Some(c) if c == product.currency => {}
                Some(_) => return Err(CheckoutError::CurrencyMismatch),
            }

            total += product.unit_price * Decimal::from(line.quantity);
            items.push(NewOrderItem {
                product_id: product.id,
                product_name: product.name.clone(),
                unit_price: product.unit_price,
                quantity: i32::try_from(line.quantity).unwrap_or(i32::MAX),
            });
        }

        // Non-empty cart, so a currency was set.
        let currency = currency.ok_or(CheckoutError::EmptyCart)?;
        Ok((items, currency, total))
    }

    /// The user's customer ID at the provider, creating one on first use.
    async fn ensure_provider_customer(&self, user: &User) -> Result<String, CheckoutError> {
        if let Some(id) = &user.provider_customer_id {
            return Ok(id.clone());
        }

        let name = format!("{} {}", user.first_name, user.last_name);
        let customer = self
            .payment
            .create_customer(user.email.as_str(), &name)
            .await?;

        UserRepository::new(self.pool)
            .set_provider_customer_id(user.id, &customer.id)
            .await?;

        Ok(customer.id)
    }
}
