//! Permission Definitions
//!
//! Role-based grants baked into the token at login. Admins carry the special
//! `"all"` grant; other roles get a fixed list per resource.

use shared::models::UserRole;

/// Customer grants
pub const CUSTOMER_PERMISSIONS: &[&str] = &[
    "products:read",
    "orders:read",
    "orders:write",
    "reviews:read",
    "reviews:write",
    "notifications:read",
    "payments:write",
];

/// Vendor grants
///
/// `orders:update_status` covers moving orders through the lifecycle;
/// placing and canceling orders stays a customer grant.
pub const VENDOR_PERMISSIONS: &[&str] = &[
    "products:read",
    "products:write",
    "products:delete",
    "orders:read",
    "orders:update_status",
    "reviews:read",
    "notifications:read",
];

/// Admin grants
pub const ADMIN_PERMISSIONS: &[&str] = &["all"];

/// Permissions for a set of roles, deduplicated, order preserved.
pub fn permissions_for_roles(roles: &[UserRole]) -> Vec<String> {
    let mut permissions: Vec<String> = Vec::new();
    for role in roles {
        let grants = match role {
            UserRole::Customer => CUSTOMER_PERMISSIONS,
            UserRole::Vendor => VENDOR_PERMISSIONS,
            UserRole::Admin => ADMIN_PERMISSIONS,
        };
        for grant in grants {
            if !permissions.iter().any(|p| p == grant) {
                permissions.push((*grant).to_string());
            }
        }
    }
    permissions
}
