//! Handlers for the `/employees` resource.
//!
//! Creating an employee or changing their status seeds the matching
//! checklist: `onboarding` expands the onboarding template anchored on the
//! start date, `exiting` expands the exit template anchored on the exit
//! date. Transitions are permissive and re-entering a status seeds a fresh
//! copy of its checklist.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdesk_core::audit::{
    ACTION_EMPLOYEE_CREATE, ACTION_EMPLOYEE_DELETE, ACTION_EMPLOYEE_PROFILE_UPDATE,
    ACTION_EMPLOYEE_STATUS_CHANGE, RESOURCE_EMPLOYEE,
};
use hrdesk_core::checklist;
use hrdesk_core::error::CoreError;
use hrdesk_core::lifecycle::{EmployeeStatus, TaskType};
use hrdesk_core::roles::Permission;
use hrdesk_core::search::like_pattern;
use hrdesk_core::types::DbId;
use hrdesk_core::validation::require_non_empty;
use hrdesk_db::models::employee::{
    CreateEmployee, Employee, EmployeeFilter, EmployeeListParams, UpdateEmployeeProfile,
    UpdateEmployeeStatus,
};
use hrdesk_db::repositories::{EmployeeRepo, TaskRepo};
use hrdesk_db::DbPool;
use serde_json::json;
use validator::Validate;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireHr, RequireManager};
use crate::query::non_blank;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// GET /api/v1/employees
///
/// List employees, optionally filtered by status, department and a free-text
/// search over name, email and employee code.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EmployeeListParams>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ReadEmployee)?;

    let filter = EmployeeFilter {
        status: non_blank(params.status)
            .as_deref()
            .map(EmployeeStatus::parse)
            .transpose()?,
        department: non_blank(params.department),
        search_pattern: params.search.as_deref().and_then(like_pattern),
    };
    let employees = EmployeeRepo::list(&state.pool, &filter).await?;

    Ok(Json(DataResponse { data: employees }))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ReadEmployee)?;

    let employee = find_employee(&state.pool, id).await?;
    Ok(Json(DataResponse { data: employee }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/employees
///
/// Create an employee. The initial status defaults to `onboarding`; when it
/// carries a checklist the tasks are generated immediately.
pub async fn create(
    RequireHr(auth): RequireHr,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("name", &input.name)?;
    require_non_empty("employee_id", &input.employee_id)?;
    require_non_empty("department", &input.department)?;
    require_non_empty("manager", &input.manager)?;
    input.validate()?;

    let status = input
        .status
        .as_deref()
        .map(EmployeeStatus::parse)
        .transpose()?
        .unwrap_or_default();

    ensure_unique(&state.pool, Some(&input.employee_id), Some(&input.email), None).await?;

    let employee = EmployeeRepo::create(&state.pool, &input, status).await?;
    let tasks_created = seed_checklist(&state.pool, &employee, status, &auth.email).await?;

    tracing::info!(
        employee_id = employee.id,
        status = %status,
        tasks_created,
        user_id = auth.user_id,
        "Employee created",
    );
    audit::record(
        &state.pool,
        &auth,
        ACTION_EMPLOYEE_CREATE,
        RESOURCE_EMPLOYEE,
        Some(employee.id),
        json!({
            "employee_id": employee.employee_id,
            "status": status.as_str(),
            "tasks_created": tasks_created,
        }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// PUT /api/v1/employees/{id}
///
/// Change an employee's status (and optionally record an exit date), then
/// seed the checklist the new status calls for.
pub async fn update_status(
    RequireHr(auth): RequireHr,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateEmployeeStatus>,
) -> AppResult<impl IntoResponse> {
    let status = EmployeeStatus::parse(&input.status)?;
    let previous = find_employee(&state.pool, id).await?;

    let employee = EmployeeRepo::update_status(&state.pool, id, status, input.exit_date)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    let tasks_created = seed_checklist(&state.pool, &employee, status, &auth.email).await?;

    tracing::info!(
        employee_id = id,
        from = %previous.status,
        to = %status,
        tasks_created,
        user_id = auth.user_id,
        "Employee status changed",
    );
    audit::record(
        &state.pool,
        &auth,
        ACTION_EMPLOYEE_STATUS_CHANGE,
        RESOURCE_EMPLOYEE,
        Some(id),
        json!({
            "from": previous.status,
            "to": status.as_str(),
            "exit_date": employee.exit_date,
            "tasks_created": tasks_created,
        }),
    )
    .await;

    Ok(Json(DataResponse { data: employee }))
}

/// PUT /api/v1/employees/{id}/profile
///
/// Partial update of profile fields. Never changes status or tasks.
pub async fn update_profile(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateEmployeeProfile>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        require_non_empty("name", name)?;
    }
    if let Some(code) = &input.employee_id {
        require_non_empty("employee_id", code)?;
    }
    input.validate()?;

    find_employee(&state.pool, id).await?;
    ensure_unique(
        &state.pool,
        input.employee_id.as_deref(),
        input.email.as_deref(),
        Some(id),
    )
    .await?;

    let employee = EmployeeRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;

    tracing::info!(employee_id = id, user_id = auth.user_id, "Employee profile updated");
    audit::record(
        &state.pool,
        &auth,
        ACTION_EMPLOYEE_PROFILE_UPDATE,
        RESOURCE_EMPLOYEE,
        Some(id),
        json!({ "fields": input.present_fields() }),
    )
    .await;

    Ok(Json(DataResponse { data: employee }))
}

/// DELETE /api/v1/employees/{id}
///
/// Delete an employee and every task they own in one transaction.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    auth.require(Permission::DeleteEmployee)?;

    match EmployeeRepo::delete_with_tasks(&state.pool, id).await? {
        Some(tasks_deleted) => {
            tracing::info!(
                employee_id = id,
                tasks_deleted,
                user_id = auth.user_id,
                "Employee deleted",
            );
            audit::record(
                &state.pool,
                &auth,
                ACTION_EMPLOYEE_DELETE,
                RESOURCE_EMPLOYEE,
                Some(id),
                json!({ "tasks_deleted": tasks_deleted }),
            )
            .await;
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_employee(pool: &DbPool, id: DbId) -> AppResult<Employee> {
    EmployeeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))
}

/// Reject an employee code or email already used by another employee.
///
/// The unique constraints still backstop concurrent writers; this check
/// exists to name the offending field in the error.
async fn ensure_unique(
    pool: &DbPool,
    employee_code: Option<&str>,
    email: Option<&str>,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if employee_code.is_none() && email.is_none() {
        return Ok(());
    }

    let Some(existing) = EmployeeRepo::find_conflicting(pool, employee_code, email, exclude_id).await?
    else {
        return Ok(());
    };

    let message = match employee_code.map(str::trim) {
        Some(code) if code == existing.employee_id => {
            format!("Employee ID '{code}' already exists")
        }
        _ => format!(
            "Email '{}' is already used by another employee",
            email.map(str::trim).unwrap_or_default()
        ),
    };
    Err(AppError::Core(CoreError::Conflict(message)))
}

/// Generate the checklist `status` calls for, if any. Returns the number of
/// tasks created.
///
/// The whole checklist is inserted with one statement, so an employee never
/// ends up with a partial checklist.
async fn seed_checklist(
    pool: &DbPool,
    employee: &Employee,
    status: EmployeeStatus,
    assigned_by: &str,
) -> AppResult<usize> {
    let Some(phase) = status.checklist_phase() else {
        return Ok(0);
    };

    let anchor = match phase {
        TaskType::Onboarding => employee.start_date,
        TaskType::Exit => employee.exit_date,
    };
    let tasks = checklist::expand(employee.id, phase, anchor, Some(assigned_by))?;
    let created = TaskRepo::create_batch(pool, &tasks).await?;

    tracing::debug!(
        employee_id = employee.id,
        phase = %phase,
        count = created.len(),
        "Checklist seeded",
    );
    Ok(created.len())
}
