//! Checkout handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use cyna_core::AddressId;

use crate::db::AddressRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{Cart, Order};
use crate::routes::cart::{load_cart, save_cart};
use crate::services::auth::AuthService;
use crate::services::checkout::{CheckoutError, CheckoutService};
use crate::state::AppState;

/// Checkout form data.
///
/// Addresses can come from the address book (`*_address_id`) or be sent
/// inline as one-line snapshots.
#[derive(Debug, Deserialize, Default)]
pub struct CheckoutRequest {
    pub billing_address_id: Option<i32>,
    pub shipping_address_id: Option<i32>,
    pub billing_address: Option<String>,
    pub shipping_address: Option<String>,
}

/// Convert the session cart into a paid order.
///
/// POST /api/checkout
#[instrument(skip(state, session, auth, body))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    auth: RequireAuth,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    let user = AuthService::new(state.pool())
        .get_user(auth.0.id)
        .await
        .map_err(super::auth::map_auth_error)?;

    let billing = resolve_address(
        &state,
        auth.0.id,
        body.billing_address_id,
        body.billing_address.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::BadRequest("billing address is required".to_owned()))?;

    // Shipping falls back to billing for digital-only orders.
    let shipping = resolve_address(
        &state,
        auth.0.id,
        body.shipping_address_id,
        body.shipping_address.as_deref(),
    )
    .await?
    .unwrap_or_else(|| billing.clone());

    let order = CheckoutService::new(state.pool(), state.payment())
        .checkout(&user, &cart, &billing, &shipping)
        .await
        .map_err(map_checkout_error)?;

    // The order is paid; the cart is spent.
    save_cart(&session, &Cart::default()).await?;

    if let Err(e) = state
        .email()
        .send_order_confirmation(
            user.email.as_str(),
            &order.id.to_string(),
            &order.total.to_string(),
            order.currency.code(),
        )
        .await
    {
        tracing::error!(error = %e, order_id = %order.id, "failed to send order confirmation");
    }

    Ok((StatusCode::CREATED, Json(order)))
}

/// Resolve an address: by ID from the user's address book, or inline.
async fn resolve_address(
    state: &AppState,
    user_id: cyna_core::UserId,
    address_id: Option<i32>,
    inline: Option<&str>,
) -> Result<Option<String>, AppError> {
    if let Some(id) = address_id {
        let address = AddressRepository::new(state.pool())
            .get_for_user(user_id, AddressId::new(id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("address {id}")))?;
        return Ok(Some(address.to_snapshot()));
    }

    Ok(inline
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned))
}

/// Map checkout errors onto HTTP-facing errors.
fn map_checkout_error(e: CheckoutError) -> AppError {
    match e {
        CheckoutError::EmptyCart => AppError::BadRequest("cart is empty".to_owned()),
        CheckoutError::ProductUnavailable(id) => {
            AppError::BadRequest(format!("product {id} is unavailable"))
        }
        CheckoutError::StockChanged => {
            AppError::Conflict("stock changed during checkout; review your cart".to_owned())
        }
        CheckoutError::CurrencyMismatch => {
            AppError::BadRequest("cart mixes currencies; check out separately".to_owned())
        }
        CheckoutError::NoPaymentMethod => {
            AppError::BadRequest("add a payment method before checking out".to_owned())
        }
        CheckoutError::PaymentDeclined { order_id, source } => {
            tracing::warn!(%order_id, error = %source, "payment declined at checkout");
            AppError::Payment(source)
        }
        CheckoutError::Payment(e) => AppError::Payment(e),
        CheckoutError::Repository(e) => AppError::Database(e),
    }
}
