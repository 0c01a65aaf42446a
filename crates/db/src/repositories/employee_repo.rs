//! Repository for the `employees` table.

use hrdesk_core::lifecycle::EmployeeStatus;
use hrdesk_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, EmployeeFilter, UpdateEmployeeProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, employee_id, email, department, manager, position, phone, \
                       start_date, birthday, exit_date, status, created_at, updated_at";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee, returning the created row.
    ///
    /// `status` is resolved by the caller (the DTO value defaults to
    /// `onboarding`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmployee,
        status: EmployeeStatus,
    ) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (name, employee_id, email, department, manager, position, phone,
                 start_date, birthday, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.name.trim())
            .bind(input.employee_id.trim())
            .bind(input.email.trim())
            .bind(&input.department)
            .bind(&input.manager)
            .bind(&input.position)
            .bind(&input.phone)
            .bind(input.start_date)
            .bind(input.birthday)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an employee by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find another employee already using `employee_code` or `email`.
    ///
    /// `exclude_id` skips the employee being edited. Either value may be
    /// `None` to skip that check.
    pub async fn find_conflicting(
        pool: &PgPool,
        employee_code: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<DbId>,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE (employee_id = $1 OR email = $2)
               AND ($3::BIGINT IS NULL OR id <> $3)
             LIMIT 1"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(employee_code.map(str::trim))
            .bind(email.map(str::trim))
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List employees matching `filter`, most recently created first.
    pub async fn list(pool: &PgPool, filter: &EmployeeFilter) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR department = $2)
               AND ($3::TEXT IS NULL
                    OR name ILIKE $3 ESCAPE '\\'
                    OR email ILIKE $3 ESCAPE '\\'
                    OR employee_id ILIKE $3 ESCAPE '\\')
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(filter.status.map(EmployeeStatus::as_str))
            .bind(&filter.department)
            .bind(&filter.search_pattern)
            .fetch_all(pool)
            .await
    }

    /// Fetch the employees with the given IDs (unknown IDs are ignored).
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Employee>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = ANY($1)");
        sqlx::query_as::<_, Employee>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Set an employee's status and, when given, their exit date.
    ///
    /// Any status may follow any other. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: EmployeeStatus,
        exit_date: Option<Date>,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                status = $2,
                exit_date = COALESCE($3, exit_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(exit_date)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied;
    /// status and tasks are never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployeeProfile,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = COALESCE($2, name),
                employee_id = COALESCE($3, employee_id),
                email = COALESCE($4, email),
                department = COALESCE($5, department),
                manager = COALESCE($6, manager),
                position = COALESCE($7, position),
                phone = COALESCE($8, phone),
                start_date = COALESCE($9, start_date),
                birthday = COALESCE($10, birthday)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.employee_id.as_deref().map(str::trim))
            .bind(input.email.as_deref().map(str::trim))
            .bind(&input.department)
            .bind(&input.manager)
            .bind(&input.position)
            .bind(&input.phone)
            .bind(input.start_date)
            .bind(input.birthday)
            .fetch_optional(pool)
            .await
    }

    /// Delete an employee together with all of their tasks.
    ///
    /// Both deletes run in one transaction. Returns the number of tasks
    /// removed, or `None` (and nothing is deleted) if the employee does not
    /// exist.
    pub async fn delete_with_tasks(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let tasks = sqlx::query("DELETE FROM tasks WHERE employee_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let employees = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if employees == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        tracing::debug!(employee_id = id, tasks, "Employee and tasks deleted");
        Ok(Some(tasks))
    }
}
