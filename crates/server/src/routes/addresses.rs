//! Address book handlers (always scoped to the logged-in user).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cyna_core::AddressId;

use crate::db::AddressRepository;
use crate::db::addresses::AddressInput;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Address;
use crate::state::AppState;

/// List the user's addresses.
///
/// GET /api/addresses
#[instrument(skip(state, auth))]
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<Address>>, AppError> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_user(auth.0.id)
        .await?;
    Ok(Json(addresses))
}

/// Form data for creating or replacing an address.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    #[serde(default)]
    pub label: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

impl AddressRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("line1", &self.line1),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} is required")));
            }
        }
        Ok(())
    }

    fn as_input(&self) -> AddressInput<'_> {
        AddressInput {
            label: self.label.trim(),
            line1: self.line1.trim(),
            line2: self.line2.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            city: self.city.trim(),
            postal_code: self.postal_code.trim(),
            country: self.country.trim(),
            is_default: self.is_default,
        }
    }
}

/// Create an address.
///
/// POST /api/addresses
#[instrument(skip(state, auth, body))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<AddressRequest>,
) -> Result<(StatusCode, Json<Address>), AppError> {
    body.validate()?;

    let address = AddressRepository::new(state.pool())
        .create(auth.0.id, body.as_input())
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// Replace an address.
///
/// PUT /api/addresses/{id}
#[instrument(skip(state, auth, body))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<AddressRequest>,
) -> Result<Json<Address>, AppError> {
    body.validate()?;

    let address = AddressRepository::new(state.pool())
        .update(auth.0.id, AddressId::new(id), body.as_input())
        .await?;

    Ok(Json(address))
}

/// Delete an address.
///
/// DELETE /api/addresses/{id}
#[instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    AddressRepository::new(state.pool())
        .delete(auth.0.id, AddressId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
