//! Category types.

use iceshopz_core::CategoryId;
use serde::Serialize;

/// A named grouping for products. Names are unique.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
