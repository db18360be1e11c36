//! Order handlers.
//!
//! Clients see their own orders; `order:read` sees everything. A non-owner
//! without that permission gets 404, not 403, so order IDs leak nothing.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cyna_core::{OrderId, OrderStatus, Permission, UserId};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_permission};
use crate::models::{Order, Transaction};
use crate::state::AppState;

/// Query parameters for order listings.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    /// Restrict to one user (staff only; clients are always restricted to
    /// themselves).
    pub user_id: Option<i32>,
}

/// List orders.
///
/// GET /api/orders?user_id=
#[instrument(skip(state, auth))]
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let repo = OrderRepository::new(state.pool());

    let orders = if auth.0.role.has_permission(Permission::OrderRead) {
        repo.list(query.user_id.map(UserId::new)).await?
    } else {
        repo.list(Some(auth.0.id)).await?
    };

    Ok(Json(orders))
}

/// Get an order with its lines.
///
/// GET /api/orders/{id}
#[instrument(skip(state, auth))]
pub async fn get(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Order>, AppError> {
    let order = OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if order.user_id != auth.0.id && !auth.0.role.has_permission(Permission::OrderRead) {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    Ok(Json(order))
}

/// List the transactions recorded against an order.
///
/// GET /api/orders/{id}/transactions
#[instrument(skip(state, auth))]
pub async fn transactions(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if order.user_id != auth.0.id && !auth.0.role.has_permission(Permission::OrderRead) {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    Ok(Json(repo.list_transactions(order.id).await?))
}

/// Form data for an order status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Transition an order's status.
///
/// PATCH /api/orders/{id}
#[instrument(skip(state, auth, body), fields(status = ?body.status))]
pub async fn update_status(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, AppError> {
    require_permission(&auth.0, Permission::OrderUpdate)?;

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !order.status.can_transition_to(body.status) {
        return Err(AppError::BadRequest(format!(
            "cannot transition order from {:?} to {:?}",
            order.status, body.status
        )));
    }

    let mut updated = repo.set_status(order.id, body.status).await?;
    updated.items = order.items;
    Ok(Json(updated))
}
