//! Audit trail vocabulary.
//!
//! Action and resource names stored in `audit_logs`. They are part of the
//! admin API's filter surface, so changing one breaks saved queries.

pub const RESOURCE_EMPLOYEE: &str = "employee";
pub const RESOURCE_TASK: &str = "task";
pub const RESOURCE_USER: &str = "user";

pub const ACTION_EMPLOYEE_CREATE: &str = "employee.create";
pub const ACTION_EMPLOYEE_STATUS_CHANGE: &str = "employee.status_change";
pub const ACTION_EMPLOYEE_PROFILE_UPDATE: &str = "employee.profile_update";
pub const ACTION_EMPLOYEE_DELETE: &str = "employee.delete";
pub const ACTION_TASK_BULK_UPDATE: &str = "task.bulk_update";
pub const ACTION_USER_CREATE: &str = "user.create";
pub const ACTION_USER_UPDATE: &str = "user.update";
pub const ACTION_USER_DEACTIVATE: &str = "user.deactivate";

/// Default and maximum page size for audit log listings.
pub const DEFAULT_AUDIT_LIMIT: i64 = 100;
pub const MAX_AUDIT_LIMIT: i64 = 500;

/// Clamp a requested page size into `1..=MAX_AUDIT_LIMIT`.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_AUDIT_LIMIT)
        .clamp(1, MAX_AUDIT_LIMIT)
}
