//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAnalyst`] -- Requires the `analyst` or `admin` role.

pub mod auth;
pub mod rbac;
