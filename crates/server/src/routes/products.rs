//! Product handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use cyna_core::{CategoryId, CurrencyCode, Permission, ProductId};

use crate::db::ProductRepository;
use crate::db::products::ProductFilter;
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_permission};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for product listings.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub category_id: Option<i32>,
    pub active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List products.
///
/// GET /api/products?category_id=&active=&limit=&offset=
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let filter = ProductFilter {
        category_id: query.category_id.map(CategoryId::new),
        active: query.active,
        limit: query.limit,
        offset: query.offset,
    };

    let products = ProductRepository::new(state.pool()).list(filter).await?;
    Ok(Json(products))
}

/// Get a product by ID.
///
/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Form data for creating or updating a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub category_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl ProductRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_owned()));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "unit_price cannot be negative".to_owned(),
            ));
        }
        if self.stock_quantity < 0 {
            return Err(AppError::BadRequest(
                "stock_quantity cannot be negative".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Create a product.
///
/// POST /api/products
#[instrument(skip(state, auth, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    require_permission(&auth.0, Permission::ProductCreate)?;
    body.validate()?;

    let product = ProductRepository::new(state.pool())
        .create(
            CategoryId::new(body.category_id),
            body.name.trim(),
            body.description.trim(),
            body.unit_price,
            body.currency,
            body.stock_quantity,
            body.image_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product.
///
/// PUT /api/products/{id}
#[instrument(skip(state, auth, body))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<Product>, AppError> {
    require_permission(&auth.0, Permission::ProductUpdate)?;
    body.validate()?;

    let product = ProductRepository::new(state.pool())
        .update(
            ProductId::new(id),
            CategoryId::new(body.category_id),
            body.name.trim(),
            body.description.trim(),
            body.unit_price,
            body.currency,
            body.stock_quantity,
            body.image_url.as_deref(),
            body.active,
        )
        .await?;

    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/products/{id}
#[instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    require_permission(&auth.0, Permission::ProductDelete)?;

    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
