//! Order domain types.

use chrono::{DateTime, Utc};
use iceshopz_core::{Cents, OrderId, OrderItemId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Status given to every order at checkout. There is no order state
/// machine; payment integration is out of scope and orders are recorded
/// as paid unconditionally.
pub const ORDER_STATUS_PAID: &str = "paid";

/// An order header. Immutable once created; there is no edit or cancel
/// path.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Sum of item price snapshots times quantities. The 5% display tax
    /// is never included here.
    pub total_cents: Cents,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An order line joined with its product's name and image, as returned by
/// order listings and used by the invoice renderer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub qty: i32,
    /// Unit price snapshot captured at order time. Decoupled from the
    /// product's live price: later price changes never alter this value.
    pub price_cents: Cents,
    pub name: String,
    pub image_url: Option<String>,
}

/// An order header together with its items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// An order header with owner contact details and items, for the admin
/// order listing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithUser {
    #[serde(flatten)]
    pub order: Order,
    pub user_name: String,
    pub user_email: String,
    pub items: Vec<OrderItemDetail>,
}

/// One requested cart line in a checkout submission.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Missing or non-numeric quantities default to 1; anything below 1
    /// is floored to 1.
    #[serde(default, deserialize_with = "lenient_qty")]
    pub qty: Option<i32>,
}

/// Accept any JSON value for `qty`, treating everything that is not an
/// integer (strings, floats, null) as absent so checkout falls back to 1.
fn lenient_qty<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64().and_then(|n| i32::try_from(n).ok()))
}

impl OrderItemRequest {
    /// The effective quantity: at least 1, defaulting to 1 when absent.
    #[must_use]
    pub fn effective_qty(&self) -> u32 {
        #[allow(clippy::cast_sign_loss)] // max(1) guarantees a positive value
        {
            self.qty.unwrap_or(1).max(1) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_qty_defaults_to_one() {
        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 1);
    }

    #[test]
    fn test_effective_qty_floors_at_one() {
        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3, "qty": -2}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 1);

        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3, "qty": 0}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 1);
    }

    #[test]
    fn test_effective_qty_tolerates_non_numeric() {
        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3, "qty": "2"}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 1);

        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3, "qty": null}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 1);

        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3, "qty": 2.5}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 1);
    }

    #[test]
    fn test_effective_qty_passes_through() {
        let req: OrderItemRequest =
            serde_json::from_str(r#"{"productId": 3, "qty": 4}"#).expect("valid item");
        assert_eq!(req.effective_qty(), 4);
    }

    #[test]
    fn test_order_with_items_flattens() {
        let order = Order {
            id: OrderId::new(1),
            user_id: UserId::new(2),
            total_cents: Cents::new(16_000),
            status: ORDER_STATUS_PAID.to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(OrderWithItems {
            order,
            items: vec![],
        })
        .expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["total_cents"], 16_000);
        assert_eq!(json["status"], "paid");
        assert!(json["items"].as_array().expect("items array").is_empty());
    }
}
