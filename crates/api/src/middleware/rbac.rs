//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role lacks
//! the gating permission. Use these in route handlers to enforce
//! authorization at the type level; finer checks call
//! [`AuthUser::require`] directly.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hrdesk_core::roles::Permission;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires [`Permission::ManageUsers`] (admin and super admin).
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Permission::ManageUsers)?;
        Ok(RequireAdmin(user))
    }
}

/// Requires [`Permission::CreateEmployee`] (HR manager and above).
///
/// Gates employee creation and status transitions, the two operations
/// that seed checklists.
pub struct RequireHr(pub AuthUser);

impl FromRequestParts<AppState> for RequireHr {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Permission::CreateEmployee)?;
        Ok(RequireHr(user))
    }
}

/// Requires [`Permission::UpdateEmployee`] (manager and above).
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Permission::UpdateEmployee)?;
        Ok(RequireManager(user))
    }
}
