//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats               -> stats
/// GET /upcoming-events     -> upcoming_events (?days=N)
/// GET /upcoming-tasks      -> upcoming_tasks
/// GET /recent-activities   -> recent_activities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/upcoming-events", get(dashboard::upcoming_events))
        .route("/upcoming-tasks", get(dashboard::upcoming_tasks))
        .route("/recent-activities", get(dashboard::recent_activities))
}
