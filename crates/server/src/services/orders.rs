//! Order placement and listing.
//!
//! Checkout flow: validate the submitted cart against the live catalog,
//! snapshot each product's current price, compute the untaxed total, and
//! persist everything atomically. The taxed preview shown before checkout
//! uses the same price snapshots but is never persisted.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;

use iceshopz_core::pricing::{self, CartQuote, PricedLine};
use iceshopz_core::{OrderId, Role, UserId};

use crate::db::orders::{OrderLine, OrderRepository};
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::analytics::Analytics;
use crate::models::{Order, OrderItemDetail, OrderItemRequest, OrderWithItems, OrderWithUser};

/// An order loaded with everything the invoice needs: header, lines, and
/// the owner's contact details.
#[derive(Debug, Clone)]
pub struct OrderForInvoice {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub customer_name: String,
    pub customer_email: String,
}

/// Order placement and listing service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Place an order for a user and return the persisted header. The
    /// items are not re-read; listings and invoices load them on demand.
    ///
    /// Each line's price is snapshotted from the catalog at this moment;
    /// later product edits never change the stored order. The persisted
    /// total is the untaxed sum of line amounts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the cart is empty or references a
    /// product that does not exist.
    pub async fn place_order(
        &self,
        user_id: UserId,
        items: &[OrderItemRequest],
    ) -> Result<Order> {
        let lines = self.price_cart(items).await?;

        let priced: Vec<PricedLine> = lines
            .iter()
            .map(|l| PricedLine::new(l.price_snapshot, l.qty))
            .collect();
        let total = pricing::order_total(&priced);

        let order_id = self
            .orders
            .create(user_id, total, Utc::now(), &lines)
            .await?;

        self.orders
            .get(order_id)
            .await?
            .ok_or_else(|| AppError::Internal("order vanished after insert".to_owned()))
    }

    /// Quote a cart without persisting anything: subtotal, 5% display tax,
    /// and taxed total.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the cart is empty or references a
    /// product that does not exist.
    pub async fn preview(&self, items: &[OrderItemRequest]) -> Result<CartQuote> {
        let lines = self.price_cart(items).await?;

        let priced: Vec<PricedLine> = lines
            .iter()
            .map(|l| PricedLine::new(l.price_snapshot, l.qty))
            .collect();

        Ok(pricing::quote(&priced))
    }

    /// Resolve a submitted cart against the catalog.
    async fn price_cart(&self, items: &[OrderItemRequest]) -> Result<Vec<OrderLine>> {
        if items.is_empty() {
            return Err(AppError::Validation("No items".to_owned()));
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .products
                .get(item.product_id)
                .await?
                .ok_or_else(|| AppError::Validation("Invalid product".to_owned()))?;

            lines.push(OrderLine {
                product_id: product.id,
                qty: item.effective_qty(),
                price_snapshot: product.price_cents,
            });
        }

        Ok(lines)
    }

    /// List a user's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a query fails.
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderWithItems>> {
        let orders = self.orders.list_for_user(user_id).await?;
        let ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        let mut items = group_items(self.orders.items_for_orders(&ids).await?);

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }

    /// List every order with owner contact and items, newest first. Admin
    /// view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a query fails.
    pub async fn all_orders(&self) -> Result<Vec<OrderWithUser>> {
        let orders = self.orders.list_all_with_users().await?;
        let ids: Vec<OrderId> = orders.iter().map(|(o, _, _)| o.id).collect();
        let mut items = group_items(self.orders.items_for_orders(&ids).await?);

        Ok(orders
            .into_iter()
            .map(|(order, user_name, user_email)| {
                let items = items.remove(&order.id).unwrap_or_default();
                OrderWithUser {
                    order,
                    user_name,
                    user_email,
                    items,
                }
            })
            .collect())
    }

    /// Load an order for invoice rendering, enforcing that the requester
    /// owns it or is an admin.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the order does not exist and
    /// `AppError::Authorization` if the requester may not see it.
    pub async fn order_for_invoice(
        &self,
        order_id: OrderId,
        requester: UserId,
        role: Role,
    ) -> Result<OrderForInvoice> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

        if order.user_id != requester && !role.is_admin() {
            return Err(AppError::Authorization("Not your order".to_owned()));
        }

        let items = self.orders.items_for_order(order_id).await?;
        let (customer_name, customer_email) = self
            .orders
            .owner_contact(order.user_id)
            .await?
            .ok_or_else(|| AppError::Internal("order owner missing".to_owned()))?;

        Ok(OrderForInvoice {
            order,
            items,
            customer_name,
            customer_email,
        })
    }

    /// Aggregate sales analytics for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a query fails.
    pub async fn analytics(&self) -> Result<Analytics> {
        Ok(self.orders.analytics().await?)
    }
}

/// Group a flat batch of items by their order id.
fn group_items(items: Vec<OrderItemDetail>) -> HashMap<OrderId, Vec<OrderItemDetail>> {
    let mut grouped: HashMap<OrderId, Vec<OrderItemDetail>> = HashMap::new();
    for item in items {
        grouped.entry(item.order_id).or_default().push(item);
    }
    grouped
}
