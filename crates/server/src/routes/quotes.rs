//! Quote route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use iceshopz_core::QuoteId;

use crate::db::QuoteRepository;
use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::Quote;
use crate::state::AppState;

/// Payload for creating or replacing a quote.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub quote_text: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// `GET /api/quotes`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Quote>>> {
    let quotes = QuoteRepository::new(state.pool()).list().await?;
    Ok(Json(quotes))
}

/// `POST /api/quotes` (admin)
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<QuoteRequest>,
) -> Result<(StatusCode, Json<Quote>)> {
    let text = body.quote_text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Quote text is required".to_owned()));
    }

    let quote = QuoteRepository::new(state.pool())
        .create(text, body.author.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

/// `PUT /api/quotes/{id}` (admin) - full replacement, not a patch.
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(body): Json<QuoteRequest>,
) -> Result<Json<Quote>> {
    let text = body.quote_text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Quote text is required".to_owned()));
    }

    let quote = QuoteRepository::new(state.pool())
        .update(QuoteId::new(id), text, body.author.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Quote not found".to_owned()))?;

    Ok(Json(quote))
}

/// `DELETE /api/quotes/{id}` (admin)
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let deleted = QuoteRepository::new(state.pool())
        .delete(QuoteId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Quote not found".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
