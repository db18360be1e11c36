//! Session-backed cart handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cyna_core::{CurrencyCode, ProductId};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::cart::{Cart, MAX_LINE_QUANTITY};
use crate::models::session_keys;
use crate::state::AppState;

/// A priced cart line in responses.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub unit_price: Decimal,
    pub currency: CurrencyCode,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// The priced cart in responses.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
    pub unit_count: u32,
}

/// Read the cart from the session (empty cart when none stored yet).
pub(crate) async fn load_cart(session: &Session) -> Result<Cart, AppError> {
    let cart = session
        .get::<Cart>(session_keys::CART)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(cart.unwrap_or_default())
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}

/// Price a cart against the catalog.
async fn price_cart(state: &AppState, cart: &Cart) -> Result<CartView, AppError> {
    let ids: Vec<ProductId> = cart.lines.iter().map(|l| l.product_id).collect();
    let products = ProductRepository::new(state.pool()).get_many(&ids).await?;

    let mut lines = Vec::with_capacity(cart.lines.len());
    let mut total = Decimal::ZERO;

    for line in &cart.lines {
        // Products can vanish from the catalog while sitting in a cart;
        // such lines are shown at zero so the client can drop them.
        let Some(product) = products.iter().find(|p| p.id == line.product_id) else {
            continue;
        };

        let line_total = product.unit_price * Decimal::from(line.quantity);
        total += line_total;
        lines.push(CartLineView {
            product_id: product.id.as_i32(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            currency: product.currency,
            quantity: line.quantity,
            line_total,
        });
    }

    Ok(CartView {
        lines,
        total,
        unit_count: cart.unit_count(),
    })
}

/// The current cart, priced.
///
/// GET /api/cart
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartView>, AppError> {
    let cart = load_cart(&session).await?;
    Ok(Json(price_cart(&state, &cart).await?))
}

/// Form data for adding a cart line.
#[derive(Debug, Deserialize)]
pub struct AddLineRequest {
    pub product_id: i32,
    pub quantity: u32,
}

/// Add a product to the cart.
///
/// POST /api/cart/items
#[instrument(skip(state, session, body), fields(product_id = body.product_id, quantity = body.quantity))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddLineRequest>,
) -> Result<(StatusCode, Json<CartView>), AppError> {
    if body.quantity == 0 || body.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )));
    }

    let product_id = ProductId::new(body.product_id);
    let product = ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let mut cart = load_cart(&session).await?;
    let requested = cart
        .lines
        .iter()
        .find(|l| l.product_id == product_id)
        .map_or(0, |l| l.quantity)
        + body.quantity;

    if !product.can_sell(requested) {
        return Err(AppError::BadRequest(format!(
            "only {} units of {} available",
            product.stock_quantity, product.name
        )));
    }

    cart.add(product_id, body.quantity);
    save_cart(&session, &cart).await?;

    Ok((StatusCode::CREATED, Json(price_cart(&state, &cart).await?)))
}

/// Form data for changing a line quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub quantity: u32,
}

/// Set the quantity of a cart line (zero removes it).
///
/// PUT /api/cart/items/{product_id}
#[instrument(skip(state, session, body), fields(quantity = body.quantity))]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
    Json(body): Json<UpdateLineRequest>,
) -> Result<Json<CartView>, AppError> {
    if body.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_LINE_QUANTITY}"
        )));
    }

    let product_id = ProductId::new(product_id);

    if body.quantity > 0 {
        let product = ProductRepository::new(state.pool())
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

        if !product.can_sell(body.quantity) {
            return Err(AppError::BadRequest(format!(
                "only {} units of {} available",
                product.stock_quantity, product.name
            )));
        }
    }

    let mut cart = load_cart(&session).await?;
    if !cart.set_quantity(product_id, body.quantity) {
        return Err(AppError::NotFound(format!(
            "product {product_id} is not in the cart"
        )));
    }
    save_cart(&session, &cart).await?;

    Ok(Json(price_cart(&state, &cart).await?))
}

/// Remove a cart line.
///
/// DELETE /api/cart/items/{product_id}
#[instrument(skip(state, session))]
pub async fn remove_item(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<Json<CartView>, AppError> {
    let mut cart = load_cart(&session).await?;
    if !cart.remove(ProductId::new(product_id)) {
        return Err(AppError::NotFound(format!(
            "product {product_id} is not in the cart"
        )));
    }
    save_cart(&session, &cart).await?;

    Ok(Json(price_cart(&state, &cart).await?))
}
