//! HTTP middleware and extractors.
//!
//! Authentication is stateless: every protected handler declares a
//! [`CurrentUser`] or [`AdminUser`] extractor, which verifies the bearer
//! token from the `Authorization` header against the shared decoding key.
//! There is no session store and no global request gate.

pub mod auth;

pub use auth::{AdminUser, CurrentUser};
