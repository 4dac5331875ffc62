//! User roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The role assigned to a user account.
///
/// Stored in the database as the lowercase strings `"user"` and `"admin"`.
/// Role escalation is not exposed through the API; admins are created by
/// seeding only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer account.
    #[default]
    User,
    /// Back-office administrator.
    Admin,
}

/// Error returned when a role string is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// The database/wire representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its database/wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownRole`] for anything other than `"user"` or `"admin"`.
    pub fn parse(s: &str) -> Result<Self, UnknownRole> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }

    /// Whether this role grants access to the admin back-office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        assert_eq!(Role::parse("user").expect("valid"), Role::User);
        assert_eq!(Role::parse("admin").expect("valid"), Role::Admin);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(Role::parse("superadmin").is_err());
        assert!(Role::parse("Admin").is_err());
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).expect("json"), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").expect("json");
        assert_eq!(role, Role::User);
    }
}
