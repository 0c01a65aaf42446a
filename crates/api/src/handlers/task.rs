//! Handlers for the `/tasks` resource.
//!
//! Any authenticated role may read tasks and change their status; creating
//! ad-hoc tasks and deleting tasks need broader permissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdesk_core::audit::{ACTION_TASK_BULK_UPDATE, RESOURCE_TASK};
use hrdesk_core::error::CoreError;
use hrdesk_core::lifecycle::{TaskStatus, TaskType};
use hrdesk_core::roles::Permission;
use hrdesk_core::search::like_pattern;
use hrdesk_core::types::DbId;
use hrdesk_core::validation::require_non_empty;
use hrdesk_db::models::task::{
    BulkUpdateResult, BulkUpdateTasks, CreateTask, TaskFilter, TaskListParams, UpdateTask,
};
use hrdesk_db::repositories::{EmployeeRepo, TaskRepo};
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::non_blank;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks
///
/// Every supplied filter narrows the result: `employee_id`, `task_type`,
/// `status` and `search` (case-insensitive substring of the title).
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ReadTask)?;

    let filter = TaskFilter {
        employee_id: params.employee_id,
        task_type: non_blank(params.task_type)
            .as_deref()
            .map(TaskType::parse)
            .transpose()?,
        status: non_blank(params.status)
            .as_deref()
            .map(TaskStatus::parse)
            .transpose()?,
        title_pattern: params.search.as_deref().and_then(like_pattern),
    };
    let tasks = TaskRepo::list(&state.pool, &filter).await?;

    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ReadTask)?;

    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/tasks
///
/// Add a one-off task to an employee's checklist.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::CreateTask)?;
    require_non_empty("title", &input.title)?;
    let task_type = TaskType::parse(&input.task_type)?;

    if EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }));
    }

    let task = TaskRepo::create(&state.pool, &input, task_type, Some(&auth.email)).await?;

    tracing::info!(
        task_id = task.id,
        employee_id = task.employee_id,
        user_id = auth.user_id,
        "Task created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/tasks/{id}
///
/// Set a task's status and optionally move its due date. Completing a task
/// stamps `completed_date`; any other status clears it.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::UpdateTask)?;
    let status = TaskStatus::parse(&input.status)?;

    let task = TaskRepo::update_status(&state.pool, id, status, input.due_date)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(task_id = id, status = %status, user_id = auth.user_id, "Task updated");

    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/v1/tasks/bulk
///
/// Apply one status to many tasks in a single statement. Ids may be numbers
/// or numeric strings. Unknown ids are skipped, so `updated_count` may be
/// lower than the number submitted. The body is `{updated_count}` without
/// the `data` envelope.
pub async fn bulk_update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<BulkUpdateTasks>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::UpdateTask)?;

    if input.task_ids.is_empty() {
        return Err(AppError::BadRequest("task_ids must not be empty".into()));
    }
    let status = TaskStatus::parse(&input.status)?;

    let task_ids = input.resolved_ids();
    let updated_count = TaskRepo::bulk_update_status(&state.pool, &task_ids, status).await?;

    tracing::info!(
        requested = input.task_ids.len(),
        updated_count,
        status = %status,
        user_id = auth.user_id,
        "Bulk task update",
    );
    audit::record(
        &state.pool,
        &auth,
        ACTION_TASK_BULK_UPDATE,
        RESOURCE_TASK,
        None,
        json!({
            "task_ids": task_ids,
            "status": status.as_str(),
            "updated_count": updated_count,
        }),
    )
    .await;

    Ok(Json(BulkUpdateResult { updated_count }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    auth.require(Permission::DeleteTask)?;

    if TaskRepo::delete(&state.pool, id).await? {
        tracing::info!(task_id = id, user_id = auth.user_id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
