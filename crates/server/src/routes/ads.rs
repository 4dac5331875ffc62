//! Promotional ad route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use iceshopz_core::AdId;

use crate::db::AdRepository;
use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::{Ad, AdPatch, NewAd};
use crate::state::AppState;

/// `GET /api/ads` - active ads only, the public storefront view.
pub async fn list_active(State(state): State<AppState>) -> Result<Json<Vec<Ad>>> {
    let ads = AdRepository::new(state.pool()).list_active().await?;
    Ok(Json(ads))
}

/// `GET /api/admin/ads` - every ad including inactive ones.
pub async fn list_all(State(state): State<AppState>, _admin: AdminUser) -> Result<Json<Vec<Ad>>> {
    let ads = AdRepository::new(state.pool()).list_all().await?;
    Ok(Json(ads))
}

/// `POST /api/ads` (admin)
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<NewAd>,
) -> Result<(StatusCode, Json<Ad>)> {
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_owned()));
    }
    if body.image_url.trim().is_empty() {
        return Err(AppError::Validation("Image is required".to_owned()));
    }

    let ad = AdRepository::new(state.pool()).create(&body).await?;

    Ok((StatusCode::CREATED, Json(ad)))
}

/// `PUT /api/ads/{id}` (admin)
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(patch): Json<AdPatch>,
) -> Result<Json<Ad>> {
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_owned()));
    }

    let ad = AdRepository::new(state.pool())
        .update(AdId::new(id), &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".to_owned()))?;

    Ok(Json(ad))
}

/// `DELETE /api/ads/{id}` (admin)
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let deleted = AdRepository::new(state.pool()).delete(AdId::new(id)).await?;

    if !deleted {
        return Err(AppError::NotFound("Ad not found".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
