//! Handlers for the `/admin` resource (user management).
//!
//! User handlers require [`Permission::ManageUsers`] via [`RequireAdmin`].
//! Granting or touching a super admin additionally requires the caller to be
//! a super admin. The audit log listing requires [`Permission::ViewAuditLogs`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hrdesk_core::audit::{
    clamp_limit, ACTION_USER_CREATE, ACTION_USER_DEACTIVATE, ACTION_USER_UPDATE, RESOURCE_USER,
};
use hrdesk_core::error::CoreError;
use hrdesk_core::roles::{can_assign_role, is_valid_role, Permission, ROLE_SUPER_ADMIN};
use hrdesk_core::types::DbId;
use hrdesk_core::validation::require_non_empty;
use hrdesk_db::models::audit::{AuditLog, AuditLogFilter, AuditLogParams};
use hrdesk_db::models::user::{CreateUser, UpdateUser, UserResponse};
use hrdesk_db::repositories::{AuditRepo, UserRepo};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::audit;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::non_blank;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a user account. Validates role and password strength, hashes the
/// password, and returns a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_non_empty("name", &input.name)?;
    input.validate()?;
    check_role_assignment(&admin, &input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email '{}' already exists",
            input.email.trim()
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email,
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, admin_id = admin.user_id, "User created");
    audit::record(
        &state.pool,
        &admin,
        ACTION_USER_CREATE,
        RESOURCE_USER,
        Some(user.id),
        json!({ "email": user.email, "role": user.role }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update name, role or active flag. Only a super admin may modify a super
/// admin account or promote someone to super admin.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(name) = &input.name {
        require_non_empty("name", name)?;
    }
    if let Some(role) = &input.role {
        check_role_assignment(&admin, role)?;
    }
    if admin.user_id == id && input.is_active == Some(false) {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".into(),
        ));
    }

    let existing = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    guard_super_admin(&admin, &existing.role)?;

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, admin_id = admin.user_id, "User updated");
    audit::record(
        &state.pool,
        &admin,
        ACTION_USER_UPDATE,
        RESOURCE_USER,
        Some(id),
        json!({
            "name": input.name,
            "role": input.role,
            "is_active": input.is_active,
        }),
    )
    .await;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate a user (sets `is_active = false`). Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".into(),
        ));
    }

    let existing = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    guard_super_admin(&admin, &existing.role)?;

    UserRepo::deactivate(&state.pool, id).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deactivated");
    audit::record(
        &state.pool,
        &admin,
        ACTION_USER_DEACTIVATE,
        RESOURCE_USER,
        Some(id),
        json!({ "email": existing.email }),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/audit-logs
///
/// Newest entries first. Filters: `user_id`, `action`, `resource`,
/// `resource_id`; `limit` defaults to 100 and is capped at 500.
pub async fn list_audit_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<AuditLogParams>,
) -> AppResult<Json<Vec<AuditLog>>> {
    auth.require(Permission::ViewAuditLogs)?;

    let filter = AuditLogFilter {
        user_id: params.user_id,
        action: non_blank(params.action),
        resource: non_blank(params.resource),
        resource_id: params.resource_id,
    };
    let entries = AuditRepo::list(&state.pool, &filter, clamp_limit(params.limit)).await?;
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_role_assignment(admin: &AuthUser, role: &str) -> AppResult<()> {
    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{role}'"
        ))));
    }
    if !can_assign_role(&admin.role, role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Role '{}' cannot assign role '{role}'",
            admin.role
        ))));
    }
    Ok(())
}

fn guard_super_admin(admin: &AuthUser, target_role: &str) -> AppResult<()> {
    if target_role == ROLE_SUPER_ADMIN && admin.role != ROLE_SUPER_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only a super admin can modify a super admin account".into(),
        )));
    }
    Ok(())
}
