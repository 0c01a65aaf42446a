//! Route definitions for the `/employees` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create (seeds checklist)
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update_status (seeds checklist)
/// DELETE /{id}           -> delete (employee + tasks)
/// PUT    /{id}/profile   -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::list).post(employee::create))
        .route(
            "/{id}",
            get(employee::get_by_id)
                .put(employee::update_status)
                .delete(employee::delete),
        )
        .route("/{id}/profile", put(employee::update_profile))
}
