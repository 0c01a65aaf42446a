//! Employee entity model and DTOs.

use hrdesk_core::lifecycle::EmployeeStatus;
use hrdesk_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An employee row from the `employees` table.
///
/// `employee_id` is the HR-facing employee code (unique), not a foreign key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub employee_id: String,
    pub email: String,
    pub department: String,
    pub manager: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub start_date: Option<Date>,
    pub birthday: Option<Date>,
    pub exit_date: Option<Date>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    pub name: String,
    pub employee_id: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub department: String,
    pub manager: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub start_date: Option<Date>,
    pub birthday: Option<Date>,
    /// Defaults to `onboarding` if omitted.
    pub status: Option<String>,
}

/// DTO for `PUT /employees/{id}`: a status change with an optional exit date.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeStatus {
    pub status: String,
    pub exit_date: Option<Date>,
}

/// DTO for `PUT /employees/{id}/profile`. All fields are optional and
/// status is deliberately absent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployeeProfile {
    pub name: Option<String>,
    pub employee_id: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub department: Option<String>,
    pub manager: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub start_date: Option<Date>,
    pub birthday: Option<Date>,
}

impl UpdateEmployeeProfile {
    /// Names of the fields this update sets.
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("employee_id", self.employee_id.is_some()),
            ("email", self.email.is_some()),
            ("department", self.department.is_some()),
            ("manager", self.manager.is_some()),
            ("position", self.position.is_some()),
            ("phone", self.phone.is_some()),
            ("start_date", self.start_date.is_some()),
            ("birthday", self.birthday.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect()
    }
}

/// Query parameters for `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListParams {
    pub status: Option<String>,
    pub department: Option<String>,
    pub search: Option<String>,
}

/// Validated employee listing filter.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
    pub department: Option<String>,
    /// `ILIKE` pattern matched against name, email and employee code.
    pub search_pattern: Option<String>,
}
