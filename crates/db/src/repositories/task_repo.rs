//! Repository for the `tasks` table.

use chrono::Utc;
use hrdesk_core::checklist::NewTask;
use hrdesk_core::lifecycle::{TaskStatus, TaskType};
use hrdesk_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_id, title, description, task_type, status, due_date, \
                       completed_date, assigned_by, created_at, updated_at";

/// Provides CRUD and bulk operations for checklist tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a single ad-hoc task in `pending` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTask,
        task_type: TaskType,
        assigned_by: Option<&str>,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (employee_id, title, description, task_type, due_date, assigned_by)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.employee_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(task_type.as_str())
            .bind(input.due_date)
            .bind(assigned_by)
            .fetch_one(pool)
            .await
    }

    /// Insert a whole checklist with a single statement.
    ///
    /// Rows are inserted in slice order through `UNNEST ... WITH ORDINALITY`,
    /// so IDs follow the template order. The statement is atomic: either
    /// every task is created or none is.
    pub async fn create_batch(pool: &PgPool, tasks: &[NewTask]) -> Result<Vec<Task>, sqlx::Error> {
        if tasks.is_empty() {
            return Ok(vec![]);
        }

        let employee_ids: Vec<DbId> = tasks.iter().map(|t| t.employee_id).collect();
        let titles: Vec<String> = tasks.iter().map(|t| t.title.clone()).collect();
        let descriptions: Vec<String> = tasks.iter().map(|t| t.description.clone()).collect();
        let task_types: Vec<String> = tasks.iter().map(|t| t.task_type.as_str().to_string()).collect();
        let due_dates: Vec<Option<Date>> = tasks.iter().map(|t| t.due_date).collect();
        let assigned_by: Vec<Option<String>> = tasks.iter().map(|t| t.assigned_by.clone()).collect();

        let query = format!(
            "INSERT INTO tasks (employee_id, title, description, task_type, due_date, assigned_by) \
             SELECT employee_id, title, description, task_type, due_date, assigned_by \
             FROM UNNEST($1::bigint[], $2::text[], $3::text[], $4::text[], $5::date[], $6::text[]) \
                  WITH ORDINALITY AS t(employee_id, title, description, task_type, due_date, assigned_by, ord) \
             ORDER BY ord \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&employee_ids)
            .bind(&titles)
            .bind(&descriptions)
            .bind(&task_types)
            .bind(&due_dates)
            .bind(&assigned_by)
            .fetch_all(pool)
            .await
    }

    /// Find a task by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks matching every set field of `filter`.
    ///
    /// Ordered by due date (undated last), then ID.
    pub async fn list(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::BIGINT IS NULL OR employee_id = $1)
               AND ($2::TEXT IS NULL OR task_type = $2)
               AND ($3::TEXT IS NULL OR status = $3)
               AND ($4::TEXT IS NULL OR title ILIKE $4 ESCAPE '\\')
             ORDER BY due_date ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(filter.employee_id)
            .bind(filter.task_type.map(TaskType::as_str))
            .bind(filter.status.map(TaskStatus::as_str))
            .bind(&filter.title_pattern)
            .fetch_all(pool)
            .await
    }

    /// Set one task's status, optionally moving its due date.
    ///
    /// `completed_date` is stamped when the new status is `completed` and
    /// cleared otherwise. Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: TaskStatus,
        due_date: Option<Date>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                status = $2,
                completed_date = $3,
                due_date = COALESCE($4, due_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(status.completed_date_for(Utc::now()))
            .bind(due_date)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of every task in `ids` with one `UPDATE` statement.
    ///
    /// IDs that do not exist are skipped. Returns the number of rows
    /// actually modified, which may be lower than `ids.len()`.
    pub async fn bulk_update_status(
        pool: &PgPool,
        ids: &[DbId],
        status: TaskStatus,
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE tasks SET status = $1, completed_date = $2 WHERE id = ANY($3)",
        )
        .bind(status.as_str())
        .bind(status.completed_date_for(Utc::now()))
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count the tasks belonging to one employee.
    pub async fn count_by_employee(pool: &PgPool, employee_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE employee_id = $1")
            .bind(employee_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Permanently delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
