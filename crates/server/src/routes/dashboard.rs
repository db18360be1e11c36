//! Marketing dashboard handler.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cyna_core::Permission;

use crate::db::orders::TopProduct;
use crate::db::{ContactMessageRepository, OrderRepository, UserRepository};
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_permission};
use crate::state::AppState;

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    /// Reporting window in days (default 30, max 365).
    pub days: Option<i64>,
}

/// Dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Window length actually used, in days.
    pub period_days: i64,
    /// Paid or fulfilled orders in the window.
    pub order_count: i64,
    /// Summed totals of those orders.
    pub revenue: Decimal,
    /// Best sellers by units.
    pub top_products: Vec<TopProduct>,
    /// Contact messages still open (not windowed).
    pub open_contact_messages: i64,
    /// Users created in the window.
    pub new_users: i64,
}

/// Marketing dashboard aggregates.
///
/// GET /api/dashboard?days=
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    require_permission(&auth.0, Permission::DashboardRead)?;

    let period_days = query.days.unwrap_or(30).clamp(1, 365);
    let since = Utc::now() - Duration::days(period_days);

    let orders = OrderRepository::new(state.pool());
    let (order_count, revenue) = orders.sales_since(since).await?;
    let top_products = orders.top_products_since(since, 5).await?;

    let open_contact_messages = ContactMessageRepository::new(state.pool())
        .count_open()
        .await?;
    let new_users = UserRepository::new(state.pool())
        .count_created_since(since)
        .await?;

    Ok(Json(DashboardResponse {
        period_days,
        order_count,
        revenue,
        top_products,
        open_contact_messages,
        new_users,
    }))
}
