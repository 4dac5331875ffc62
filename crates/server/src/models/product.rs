//! Product catalog types.

use iceshopz_core::{CategoryId, Cents, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog product, joined with its category name.
///
/// `stock` is advisory only: it is displayed in the storefront but never
/// checked or decremented at order time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price_cents: Cents,
    pub image_url: String,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
}

/// Payload for creating a product. All fields required except stock.
#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price_cents: Cents,
    pub image_url: String,
    #[serde(default)]
    pub stock: i32,
    pub category_id: CategoryId,
}

/// Patch for partial product updates.
///
/// Each field is independently settable; unset fields keep their current
/// value. The repository turns this into a single parameterized statement
/// (no dynamic SQL assembly).
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<Cents>,
    pub image_url: Option<String>,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
}

impl ProductPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.image_url.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch {
            price_cents: Some(Cents::new(9000)),
            ..ProductPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_deserializes_partial_body() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"price_cents": 9500, "stock": 12}"#).expect("valid patch");
        assert_eq!(patch.price_cents, Some(Cents::new(9500)));
        assert_eq!(patch.stock, Some(12));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_new_product_defaults_stock() {
        let new: NewProduct = serde_json::from_str(
            r#"{
                "name": "Rainbow Cone",
                "description": "Vanilla scoop with rainbow sprinkles.",
                "price_cents": 8000,
                "image_url": "https://example.com/cone.jpg",
                "category_id": 1
            }"#,
        )
        .expect("valid product");
        assert_eq!(new.stock, 0);
    }
}
