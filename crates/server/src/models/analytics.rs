//! Admin analytics types.

use chrono::NaiveDate;
use iceshopz_core::Cents;
use serde::Serialize;

/// The full analytics payload for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub totals: OrderTotals,
    pub avg: AvgOrder,
    pub top_items: Vec<TopItem>,
    /// Last 7 days with orders, oldest first.
    pub revenue_by_day: Vec<DayRevenue>,
}

/// Lifetime order count and revenue.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderTotals {
    pub total_orders: i64,
    pub total_revenue: Cents,
}

/// Average order value in minor units.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AvgOrder {
    pub avg_order: Cents,
}

/// A best-selling product by quantity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopItem {
    pub name: String,
    pub qty: i64,
    pub revenue: Cents,
}

/// One day's order count and revenue.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DayRevenue {
    pub day: NaiveDate,
    pub orders: i64,
    pub revenue: Cents,
}
