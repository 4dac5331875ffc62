//! User domain types.

use iceshopz_core::{Email, Role, UserId};
use serde::Serialize;

/// A registered account (domain type).
///
/// The password hash never leaves the repository layer; this type is safe
/// to hold in handlers.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Account role.
    pub role: Role,
}
