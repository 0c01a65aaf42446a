//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// User routes require the user-management permission; the audit log needs
/// the audit permission. Both are enforced by the handlers.
///
/// ```text
/// GET    /users         -> list_users
/// POST   /users         -> create_user
/// GET    /users/{id}    -> get_user
/// PUT    /users/{id}    -> update_user
/// DELETE /users/{id}    -> deactivate_user
/// GET    /audit-logs    -> list_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::deactivate_user),
        )
        .route("/audit-logs", get(admin::list_audit_logs))
}
