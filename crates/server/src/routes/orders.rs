//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use iceshopz_core::OrderId;
use iceshopz_core::pricing::CartQuote;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{Order, OrderItemRequest, OrderWithItems};
use crate::services::{InvoiceDocument, OrderService};
use crate::state::AppState;

/// Checkout payload: the cart lines to order.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// `POST /api/orders`
///
/// Responds with the persisted order header; the items are not echoed
/// back.
pub async fn place(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = OrderService::new(state.pool())
        .place_order(user.id, &body.items)
        .await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.id,
        total_cents = %order.total_cents,
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// `POST /api/orders/preview`
///
/// Returns the taxed cart quote without creating anything.
pub async fn preview(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<Json<CartQuote>> {
    let quote = OrderService::new(state.pool()).preview(&body.items).await?;
    Ok(Json(quote))
}

/// `GET /api/orders/me`
pub async fn mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = OrderService::new(state.pool())
        .orders_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// `GET /api/orders/{id}/invoice`
///
/// Streams the PDF as an attachment. Owner-or-admin only.
pub async fn invoice(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Response> {
    let source = OrderService::new(state.pool())
        .order_for_invoice(OrderId::new(id), user.id, user.role)
        .await?;

    let document = InvoiceDocument::from_order(&source);
    let bytes = crate::services::invoice::render(&document)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename()),
        ),
    ];

    Ok((headers, bytes).into_response())
}
