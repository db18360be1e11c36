//! Payment method handlers.
//!
//! Cards live at the payment provider; these routes attach/detach there and
//! mirror the display data locally.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cyna_core::PaymentMethodId;

use crate::db::{PaymentMethodRepository, UserRepository};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::PaymentMethod;
use crate::state::AppState;

/// List the user's payment methods.
///
/// GET /api/payment-methods
#[instrument(skip(state, auth))]
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<PaymentMethod>>, AppError> {
    let methods = PaymentMethodRepository::new(state.pool())
        .list_for_user(auth.0.id)
        .await?;
    Ok(Json(methods))
}

/// Form data for attaching a payment method.
///
/// The client tokenizes the card with the provider first and sends the
/// resulting method ID; raw card numbers never touch this server.
#[derive(Debug, Deserialize)]
pub struct AttachRequest {
    pub provider_method_id: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Attach a payment method and mirror it locally.
///
/// POST /api/payment-methods
#[instrument(skip(state, auth, body))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<AttachRequest>,
) -> Result<(StatusCode, Json<PaymentMethod>), AppError> {
    let method_id = body.provider_method_id.trim();
    if method_id.is_empty() {
        return Err(AppError::BadRequest(
            "provider_method_id is required".to_owned(),
        ));
    }

    let users = UserRepository::new(state.pool());
    let user = users
        .get_by_id(auth.0.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let customer_id = match user.provider_customer_id {
        Some(id) => id,
        None => {
            let name = format!("{} {}", user.first_name, user.last_name);
            let customer = state
                .payment()
                .create_customer(user.email.as_str(), &name)
                .await?;
            users
                .set_provider_customer_id(user.id, &customer.id)
                .await?;
            customer.id
        }
    };

    let attached = state
        .payment()
        .attach_payment_method(method_id, &customer_id)
        .await?;

    let card = attached
        .card
        .ok_or_else(|| AppError::BadRequest("payment method is not a card".to_owned()))?;

    let method = PaymentMethodRepository::new(state.pool())
        .create(
            auth.0.id,
            &attached.id,
            &card.brand,
            &card.last4,
            card.exp_month,
            card.exp_year,
            body.is_default,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(method)))
}

/// Detach a payment method at the provider and remove the mirror.
///
/// DELETE /api/payment-methods/{id}
#[instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let repo = PaymentMethodRepository::new(state.pool());

    let method = repo
        .get_for_user(auth.0.id, PaymentMethodId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("payment method {id}")))?;

    state
        .payment()
        .detach_payment_method(&method.provider_method_id)
        .await?;

    repo.delete(auth.0.id, method.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
