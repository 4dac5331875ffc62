//! Shared type definitions.

pub mod email;
pub mod id;
pub mod money;
pub mod role;

pub use email::{Email, EmailError};
pub use id::{AdId, CategoryId, OrderId, OrderItemId, ProductId, QuoteId, UserId};
pub use money::Cents;
pub use role::{Role, UnknownRole};
