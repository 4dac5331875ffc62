//! Domain models.
//!
//! These types represent validated domain objects and the JSON shapes the
//! API exchanges with clients, separate from raw database rows.

pub mod ad;
pub mod analytics;
pub mod category;
pub mod order;
pub mod product;
pub mod quote;
pub mod user;

pub use ad::{Ad, AdPatch, NewAd};
pub use category::Category;
pub use order::{
    ORDER_STATUS_PAID, Order, OrderItemDetail, OrderItemRequest, OrderWithItems, OrderWithUser,
};
pub use product::{NewProduct, Product, ProductPatch};
pub use quote::Quote;
pub use user::User;
