//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in user roles
///
/// Roles are stored in the `roles` table and linked to users through a
/// pivot; a user can hold several roles at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum UserRole {
    Customer,
    Admin,
    Vendor,
}

impl UserRole {
    /// Get the lowercase wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
            UserRole::Vendor => "vendor",
        }
    }

    /// Parse from the lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(UserRole::Customer),
            "admin" => Some(UserRole::Admin),
            "vendor" => Some(UserRole::Vendor),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// Assign or remove a role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssign {
    pub role: UserRole,
}

/// Response after a role was assigned to or removed from a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChanged {
    pub message: String,
    pub user: super::user::User,
}

/// The current user's role names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesResponse {
    pub roles: Vec<UserRole>,
}
