//! Subscription handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cyna_core::{SubscriptionId, SubscriptionStatus};

use crate::db::SubscriptionRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Subscription;
use crate::state::AppState;

/// List the user's subscriptions.
///
/// GET /api/subscriptions
#[instrument(skip(state, auth))]
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subscriptions = SubscriptionRepository::new(state.pool())
        .list_for_user(auth.0.id)
        .await?;
    Ok(Json(subscriptions))
}

/// Cancel a subscription at the provider and locally.
///
/// DELETE /api/subscriptions/{id}
///
/// Access remains until the end of the paid period; this only stops the
/// renewal.
#[instrument(skip(state, auth))]
pub async fn cancel(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Subscription>, AppError> {
    let repo = SubscriptionRepository::new(state.pool());

    let subscription = repo
        .get_for_user(auth.0.id, SubscriptionId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("subscription {id}")))?;

    if subscription.status == SubscriptionStatus::Cancelled {
        return Err(AppError::Conflict("subscription already cancelled".to_owned()));
    }

    state
        .payment()
        .cancel_subscription(&subscription.provider_subscription_id)
        .await?;

    let cancelled = repo
        .set_status(subscription.id, SubscriptionStatus::Cancelled)
        .await?;

    tracing::info!(subscription_id = %cancelled.id, "subscription cancelled");
    Ok(Json(cancelled))
}
