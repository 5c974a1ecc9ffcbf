//! Well-known user role names.
//!
//! These must match the CHECK constraint on `users.role`.

/// Full administrative access.
pub const ROLE_ADMIN: &str = "admin";

/// May run analytical jobs and upload datasets.
pub const ROLE_ANALYST: &str = "analyst";

/// Read-only access to sales data and generated analytics.
pub const ROLE_VIEWER: &str = "viewer";

/// Returns `true` if `role` is one of the known role names.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_ANALYST | ROLE_VIEWER)
}
