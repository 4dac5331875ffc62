//! Business logic services.
//!
//! Services sit between the HTTP routes and the repositories: they own
//! validation, password and token handling, order pricing, and invoice
//! rendering. Handlers stay thin.

pub mod auth;
pub mod invoice;
pub mod orders;

pub use auth::{AuthService, Claims};
pub use invoice::InvoiceDocument;
pub use orders::OrderService;
