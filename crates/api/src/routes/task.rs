//! Route definitions for the `/tasks` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /          -> list (employee_id, task_type, status, search)
/// POST   /          -> create
/// PUT    /bulk      -> bulk_update
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/bulk", put(task::bulk_update))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
}
