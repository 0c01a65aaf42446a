pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/me                             current user (auth required)
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    get, update, deactivate
/// /admin/audit-logs                    audit trail (admin only)
///
/// /employees                           list, create
/// /employees/{id}                      get, status change, delete (+ tasks)
/// /employees/{id}/profile              profile update
///
/// /tasks                               list (filters), create ad-hoc
/// /tasks/bulk                          bulk status update
/// /tasks/{id}                          get, update status, delete
///
/// /dashboard/stats                     employee + task counters
/// /dashboard/upcoming-events           birthdays and anniversaries
/// /dashboard/upcoming-tasks            open tasks due within a week
/// /dashboard/recent-activities         newest employees and tasks
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/employees", employee::router())
        .nest("/tasks", task::router())
        .nest("/dashboard", dashboard::router())
}
