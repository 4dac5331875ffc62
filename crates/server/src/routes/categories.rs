//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use iceshopz_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::Category;
use crate::state::AppState;

/// Payload for creating or renaming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

/// `GET /api/categories`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// `POST /api/categories` (admin)
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_owned()));
    }

    let category = CategoryRepository::new(state.pool())
        .create(name)
        .await
        .map_err(duplicate_name)?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/categories/{id}` (admin)
pub async fn rename(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<Category>> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_owned()));
    }

    let category = CategoryRepository::new(state.pool())
        .rename(CategoryId::new(id), name)
        .await
        .map_err(duplicate_name)?
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))?;

    Ok(Json(category))
}

/// `DELETE /api/categories/{id}` (admin)
///
/// Conflicts while any product still references the category.
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let deleted = CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Category not found".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}

/// Surface a unique-name violation as a 409 instead of a bare conflict.
fn duplicate_name(e: crate::db::RepositoryError) -> AppError {
    match e {
        crate::db::RepositoryError::Conflict(_) => {
            AppError::Duplicate("Category already exists".to_owned())
        }
        other => AppError::Database(other),
    }
}
