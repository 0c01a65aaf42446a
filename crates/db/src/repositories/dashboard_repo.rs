//! Read-only aggregates for the dashboard endpoints.

use hrdesk_core::types::Date;
use sqlx::PgPool;

use crate::models::dashboard::{StatusCount, TaskStats};
use crate::models::employee::Employee;
use crate::models::task::Task;

const EMPLOYEE_COLUMNS: &str = "id, name, employee_id, email, department, manager, position, \
                                phone, start_date, birthday, exit_date, status, created_at, updated_at";

const TASK_COLUMNS: &str = "id, employee_id, title, description, task_type, status, due_date, \
                            completed_date, assigned_by, created_at, updated_at";

/// Provides dashboard aggregation queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Employee counts grouped by status. Statuses with no employees are
    /// absent; the caller fills zeros.
    pub async fn employee_status_counts(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM employees GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Task counters relative to `today`, with "upcoming" ending at
    /// `window_end` (inclusive).
    pub async fn task_stats(
        pool: &PgPool,
        today: Date,
        window_end: Date,
    ) -> Result<TaskStats, sqlx::Error> {
        sqlx::query_as::<_, TaskStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status <> 'completed' AND due_date < $1) AS overdue,
                COUNT(*) FILTER (
                    WHERE status <> 'completed' AND due_date >= $1 AND due_date <= $2
                ) AS upcoming
             FROM tasks",
        )
        .bind(today)
        .bind(window_end)
        .fetch_one(pool)
        .await
    }

    /// Current employees (not exited or inactive) with a birthday or start
    /// date on record, for the events widget.
    pub async fn employees_with_dates(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees
             WHERE status NOT IN ('exited', 'inactive')
               AND (birthday IS NOT NULL OR start_date IS NOT NULL)
             ORDER BY name"
        );
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Open tasks due on or before `until`, overdue ones included, soonest
    /// first.
    pub async fn open_tasks_due_by(pool: &PgPool, until: Date) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE status <> 'completed' AND due_date IS NOT NULL AND due_date <= $1
             ORDER BY due_date ASC, id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    /// The most recently created employees.
    pub async fn recent_employees(pool: &PgPool, limit: i64) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The most recently updated tasks.
    pub async fn recent_tasks(pool: &PgPool, limit: i64) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY updated_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
