//! Quote types (short marketing blurbs shown on the storefront).

use iceshopz_core::QuoteId;
use serde::Serialize;

/// A displayable quote. Independent of orders; admin-owned content.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Quote {
    pub id: QuoteId,
    pub quote_text: String,
    pub author: Option<String>,
}
