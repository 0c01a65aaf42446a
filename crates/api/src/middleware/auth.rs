//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hrdesk_core::error::CoreError;
use hrdesk_core::roles::{role_has_permission, Permission};
use hrdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     user.require(Permission::ReadTask)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"hr_manager"`).
    pub role: String,
    /// The user's email at the time the token was issued.
    pub email: String,
    /// `User-Agent` of the request, kept for the audit trail.
    pub user_agent: Option<String>,
}

impl AuthUser {
    /// Reject with 403 Forbidden unless the user's role grants `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if role_has_permission(&self.role, permission) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Role '{}' lacks permission {permission:?}",
                self.role
            ))))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user_agent = parts
            .headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            email: claims.email,
            user_agent,
        })
    }
}
