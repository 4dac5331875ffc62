//! Order repository for database operations.
//!
//! Order placement is the one multi-statement write in the system: the
//! header insert and the per-line inserts run inside a single transaction
//! so a failure anywhere leaves no partial order behind. Everything else
//! here is read-only projection.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use iceshopz_core::{Cents, OrderId, UserId};

use super::RepositoryError;
use crate::models::order::ORDER_STATUS_PAID;
use crate::models::{Order, OrderItemDetail};
use crate::models::analytics::{Analytics, AvgOrder, DayRevenue, OrderTotals, TopItem};

/// A validated, priced line ready to be persisted: the price is the
/// snapshot captured when the product was fetched, not a live lookup.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: iceshopz_core::ProductId,
    pub qty: u32,
    pub price_snapshot: Cents,
}

#[derive(sqlx::FromRow)]
struct OrderUserRow {
    #[sqlx(flatten)]
    order: Order,
    user_name: String,
    user_email: String,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order header and its lines atomically.
    ///
    /// All statements run on one connection inside a transaction; commit
    /// is explicit and any error (or early return) rolls the whole thing
    /// back, so partial orders are never visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is
    /// persisted in that case.
    pub async fn create(
        &self,
        user_id: UserId,
        total: Cents,
        created_at: DateTime<Utc>,
        lines: &[OrderLine],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO orders (user_id, total_cents, status, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(total)
        .bind(ORDER_STATUS_PAID)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, qty, price_cents)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(i64::from(line.qty))
            .bind(line.price_snapshot)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// Get an order header by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, total_cents, status, created_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// List a user's order headers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_cents, status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List all order headers with owner contact details, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all_with_users(
        &self,
    ) -> Result<Vec<(Order, String, String)>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderUserRow>(
            r"
            SELECT o.id, o.user_id, o.total_cents, o.status, o.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.order, r.user_name, r.user_email))
            .collect())
    }

    /// Fetch the items for one order, joined with product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItemDetail>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItemDetail>(
            r"
            SELECT oi.id, oi.order_id, oi.product_id, oi.qty, oi.price_cents,
                   p.name, p.image_url
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id ASC
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Fetch the items for a batch of orders in one round-trip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<OrderItemDetail>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = order_ids.iter().map(OrderId::as_i32).collect();

        let items = sqlx::query_as::<_, OrderItemDetail>(
            r"
            SELECT oi.id, oi.order_id, oi.product_id, oi.qty, oi.price_cents,
                   p.name, p.image_url
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.id ASC
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get the name and email of an order's owner, for the invoice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn owner_contact(
        &self,
        user_id: UserId,
    ) -> Result<Option<(String, String)>, RepositoryError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT name, email FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row)
    }

    /// Aggregate sales analytics for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn analytics(&self) -> Result<Analytics, RepositoryError> {
        let totals = sqlx::query_as::<_, OrderTotals>(
            r"
            SELECT COUNT(*) AS total_orders,
                   COALESCE(SUM(total_cents), 0)::BIGINT AS total_revenue
            FROM orders
            ",
        )
        .fetch_one(self.pool)
        .await?;

        let avg = sqlx::query_as::<_, AvgOrder>(
            "SELECT COALESCE(AVG(total_cents), 0)::BIGINT AS avg_order FROM orders",
        )
        .fetch_one(self.pool)
        .await?;

        let top_items = sqlx::query_as::<_, TopItem>(
            r"
            SELECT p.name,
                   SUM(oi.qty)::BIGINT AS qty,
                   COALESCE(SUM(oi.qty * oi.price_cents), 0)::BIGINT AS revenue
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            GROUP BY p.id, p.name
            ORDER BY qty DESC
            LIMIT 5
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut revenue_by_day = sqlx::query_as::<_, DayRevenue>(
            r"
            SELECT created_at::DATE AS day,
                   COUNT(*) AS orders,
                   COALESCE(SUM(total_cents), 0)::BIGINT AS revenue
            FROM orders
            GROUP BY created_at::DATE
            ORDER BY day DESC
            LIMIT 7
            ",
        )
        .fetch_all(self.pool)
        .await?;

        // Chart-friendly: oldest day first
        revenue_by_day.reverse();

        Ok(Analytics {
            totals,
            avg,
            top_items,
            revenue_by_day,
        })
    }
}
