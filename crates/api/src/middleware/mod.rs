//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the user-management permission.
//! - [`rbac::RequireHr`] -- Requires the employee-creation permission.
//! - [`rbac::RequireManager`] -- Requires the employee-update permission.

pub mod auth;
pub mod rbac;
