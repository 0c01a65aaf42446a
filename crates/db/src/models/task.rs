//! Checklist task model and DTOs.

use hrdesk_core::lifecycle::{TaskStatus, TaskType};
use hrdesk_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task row from the `tasks` table. Every task belongs to one employee.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub employee_id: DbId,
    pub title: String,
    pub description: String,
    pub task_type: String,
    pub status: String,
    pub due_date: Option<Date>,
    /// Set exactly while `status` is `completed`.
    pub completed_date: Option<Timestamp>,
    /// Email of the user whose action created the task.
    pub assigned_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an ad-hoc task outside the checklist templates.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub employee_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub task_type: String,
    pub due_date: Option<Date>,
}

/// DTO for `PUT /tasks/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub status: String,
    pub due_date: Option<Date>,
}

/// DTO for `PUT /tasks/bulk`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateTasks {
    pub task_ids: Vec<TaskRef>,
    pub status: String,
}

impl BulkUpdateTasks {
    /// Ids that name a possible task row. Strings that are not integers
    /// cannot match anything and are dropped.
    pub fn resolved_ids(&self) -> Vec<DbId> {
        self.task_ids.iter().filter_map(TaskRef::resolve).collect()
    }
}

/// A task id as clients send it: either a JSON number or its string form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TaskRef {
    Number(DbId),
    Text(String),
}

impl TaskRef {
    pub fn resolve(&self) -> Option<DbId> {
        match self {
            TaskRef::Number(id) => Some(*id),
            TaskRef::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

/// Result of a bulk status update. `updated_count` can be lower than the
/// number of submitted ids: unknown ids are skipped.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BulkUpdateResult {
    pub updated_count: u64,
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub employee_id: Option<DbId>,
    pub task_type: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Validated task listing filter. Every set field narrows the result (AND).
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub employee_id: Option<DbId>,
    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    /// `ILIKE` pattern matched against the title.
    pub title_pattern: Option<String>,
}
