//! Admin dashboard route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::AdminUser;
use crate::models::OrderWithUser;
use crate::models::analytics::Analytics;
use crate::services::OrderService;
use crate::state::AppState;

/// `GET /api/admin/orders` - every order with owner contact and items.
pub async fn orders(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<OrderWithUser>>> {
    let orders = OrderService::new(state.pool()).all_orders().await?;
    Ok(Json(orders))
}

/// `GET /api/admin/analytics` - lifetime totals, average order value, top
/// sellers, and the last week of daily revenue.
pub async fn analytics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Analytics>> {
    let analytics = OrderService::new(state.pool()).analytics().await?;
    Ok(Json(analytics))
}
