//! Handlers for the `/dashboard` resource.
//!
//! Read-only aggregates over employees and tasks. "Today" is the current UTC
//! date.

use std::collections::{BTreeMap, HashMap};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use hrdesk_core::dashboard::{
    clamp_event_window, days_until, task_priority, upcoming_anniversary, upcoming_birthday,
    EventKind, Occurrence, TaskPriority, UPCOMING_TASK_WINDOW_DAYS,
};
use hrdesk_core::lifecycle::EmployeeStatus;
use hrdesk_core::roles::Permission;
use hrdesk_core::types::{Date, DbId};
use hrdesk_db::models::dashboard::TaskStats;
use hrdesk_db::models::employee::Employee;
use hrdesk_db::models::task::Task;
use hrdesk_db::repositories::{DashboardRepo, EmployeeRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::auth::AuthUser;
use crate::query::DaysParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Employees shown by `recent-activities`.
const RECENT_EMPLOYEES: i64 = 5;

/// Tasks shown by `recent-activities`.
const RECENT_TASKS: i64 = 10;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `GET /dashboard/stats`.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Employee count per status; every status is present.
    pub employee_stats: BTreeMap<&'static str, i64>,
    pub task_stats: TaskStats,
}

/// Compact employee reference embedded in dashboard items.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    pub id: DbId,
    pub name: String,
    pub employee_id: String,
    pub department: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            employee_id: employee.employee_id.clone(),
            department: employee.department.clone(),
        }
    }
}

/// A birthday or work anniversary inside the look-ahead window.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingEvent {
    pub employee: EmployeeSummary,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub date: Date,
    pub days_until: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<i32>,
}

/// Response for `GET /dashboard/upcoming-events`.
#[derive(Debug, Serialize)]
pub struct UpcomingEvents {
    pub days: i64,
    pub upcoming_birthdays: Vec<UpcomingEvent>,
    pub upcoming_anniversaries: Vec<UpcomingEvent>,
    /// Both kinds merged, soonest first.
    pub upcoming_events: Vec<UpcomingEvent>,
}

/// An open task due soon (or already overdue).
#[derive(Debug, Serialize)]
pub struct UpcomingTask {
    pub task: Task,
    pub employee: Option<EmployeeSummary>,
    pub days_until: i64,
    pub is_overdue: bool,
    pub priority: TaskPriority,
}

/// Response for `GET /dashboard/upcoming-tasks`.
#[derive(Debug, Serialize)]
pub struct UpcomingTasks {
    pub upcoming_tasks: Vec<UpcomingTask>,
    pub overdue_count: usize,
    pub due_this_week: usize,
}

/// Response for `GET /dashboard/recent-activities`.
#[derive(Debug, Serialize)]
pub struct RecentActivities {
    pub recent_employees: Vec<Employee>,
    pub recent_tasks: Vec<Task>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/stats
pub async fn stats(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ViewReports)?;

    let today = today();
    let counts = DashboardRepo::employee_status_counts(&state.pool).await?;
    let task_stats = DashboardRepo::task_stats(
        &state.pool,
        today,
        today + Duration::days(UPCOMING_TASK_WINDOW_DAYS),
    )
    .await?;

    let mut employee_stats: BTreeMap<&'static str, i64> = EmployeeStatus::ALL
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect();
    for row in counts {
        if let Ok(status) = EmployeeStatus::parse(&row.status) {
            employee_stats.insert(status.as_str(), row.count);
        }
    }

    Ok(Json(DataResponse {
        data: DashboardStats {
            employee_stats,
            task_stats,
        },
    }))
}

/// GET /api/v1/dashboard/upcoming-events?days=N
///
/// Birthdays and work anniversaries of current employees within `days`
/// (default from `UPCOMING_EVENTS_DAYS`), sorted by days remaining then name.
pub async fn upcoming_events(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DaysParams>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ViewReports)?;

    let days = clamp_event_window(params.days, state.config.upcoming_events_days);
    let employees = DashboardRepo::employees_with_dates(&state.pool).await?;

    Ok(Json(DataResponse {
        data: collect_events(&employees, today(), days),
    }))
}

/// GET /api/v1/dashboard/upcoming-tasks
///
/// Open tasks due within the next week, overdue ones included.
pub async fn upcoming_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ViewReports)?;

    let today = today();
    let tasks = DashboardRepo::open_tasks_due_by(
        &state.pool,
        today + Duration::days(UPCOMING_TASK_WINDOW_DAYS),
    )
    .await?;

    let mut employee_ids: Vec<DbId> = tasks.iter().map(|t| t.employee_id).collect();
    employee_ids.sort_unstable();
    employee_ids.dedup();
    let employees: HashMap<DbId, EmployeeSummary> =
        EmployeeRepo::list_by_ids(&state.pool, &employee_ids)
            .await?
            .iter()
            .map(|e| (e.id, EmployeeSummary::from(e)))
            .collect();

    let upcoming_tasks: Vec<UpcomingTask> = tasks
        .into_iter()
        .filter_map(|task| {
            let due = task.due_date?;
            let days = days_until(due, today);
            Some(UpcomingTask {
                employee: employees.get(&task.employee_id).cloned(),
                days_until: days,
                is_overdue: days < 0,
                priority: task_priority(days),
                task,
            })
        })
        .collect();

    let overdue_count = upcoming_tasks.iter().filter(|t| t.is_overdue).count();
    let due_this_week = upcoming_tasks.len() - overdue_count;

    Ok(Json(DataResponse {
        data: UpcomingTasks {
            upcoming_tasks,
            overdue_count,
            due_this_week,
        },
    }))
}

/// GET /api/v1/dashboard/recent-activities
pub async fn recent_activities(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.require(Permission::ViewReports)?;

    let recent_employees = DashboardRepo::recent_employees(&state.pool, RECENT_EMPLOYEES).await?;
    let recent_tasks = DashboardRepo::recent_tasks(&state.pool, RECENT_TASKS).await?;

    Ok(Json(DataResponse {
        data: RecentActivities {
            recent_employees,
            recent_tasks,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today() -> Date {
    Utc::now().date_naive()
}

fn to_event(employee: &Employee, occurrence: Occurrence) -> UpcomingEvent {
    UpcomingEvent {
        employee: EmployeeSummary::from(employee),
        kind: occurrence.kind,
        date: occurrence.date,
        days_until: occurrence.days_until,
        years: occurrence.years,
    }
}

/// Build the events payload for `employees` as seen on `today`.
pub fn collect_events(employees: &[Employee], today: Date, days: i64) -> UpcomingEvents {
    let by_days_then_name = |a: &UpcomingEvent, b: &UpcomingEvent| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.employee.name.cmp(&b.employee.name))
    };

    let mut upcoming_birthdays: Vec<UpcomingEvent> = employees
        .iter()
        .filter_map(|e| {
            let occurrence = upcoming_birthday(e.birthday?, today, days)?;
            Some(to_event(e, occurrence))
        })
        .collect();
    let mut upcoming_anniversaries: Vec<UpcomingEvent> = employees
        .iter()
        .filter_map(|e| {
            let occurrence = upcoming_anniversary(e.start_date?, today, days)?;
            Some(to_event(e, occurrence))
        })
        .collect();

    upcoming_birthdays.sort_by(by_days_then_name);
    upcoming_anniversaries.sort_by(by_days_then_name);

    let mut upcoming_events: Vec<UpcomingEvent> = upcoming_birthdays
        .iter()
        .chain(&upcoming_anniversaries)
        .cloned()
        .collect();
    upcoming_events.sort_by(by_days_then_name);

    UpcomingEvents {
        days,
        upcoming_birthdays,
        upcoming_anniversaries,
        upcoming_events,
    }
}
