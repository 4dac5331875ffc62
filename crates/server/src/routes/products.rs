//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use iceshopz_core::{Cents, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// `POST /api/products` (admin)
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_owned()));
    }
    if body.price_cents < Cents::ZERO {
        return Err(AppError::Validation("Invalid price".to_owned()));
    }

    let product = ProductRepository::new(state.pool()).create(&body).await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}` (admin)
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_owned()));
    }
    if patch.price_cents.is_some_and(|p| p < Cents::ZERO) {
        return Err(AppError::Validation("Invalid price".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// `DELETE /api/products/{id}` (admin)
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
