//! Role names and the role → permission map.
//!
//! Role names must match the `CHECK` constraint on `users.role` in
//! `20250301000003_create_users_table.sql`.

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR_MANAGER: &str = "hr_manager";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";

/// All valid role names, highest privilege first.
pub const VALID_ROLES: &[&str] = &[
    ROLE_SUPER_ADMIN,
    ROLE_ADMIN,
    ROLE_HR_MANAGER,
    ROLE_MANAGER,
    ROLE_EMPLOYEE,
];

/// Check whether a string is a known role name.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageUsers,
    CreateEmployee,
    ReadEmployee,
    UpdateEmployee,
    DeleteEmployee,
    CreateTask,
    ReadTask,
    UpdateTask,
    DeleteTask,
    ViewReports,
    ViewAuditLogs,
}

/// Whether `role` is granted `permission`. Unknown roles get nothing.
pub fn role_has_permission(role: &str, permission: Permission) -> bool {
    use Permission::*;

    match role {
        ROLE_SUPER_ADMIN | ROLE_ADMIN => true,
        ROLE_HR_MANAGER => !matches!(permission, ManageUsers | ViewAuditLogs),
        ROLE_MANAGER => matches!(
            permission,
            ReadEmployee | UpdateEmployee | CreateTask | ReadTask | UpdateTask | ViewReports
        ),
        ROLE_EMPLOYEE => matches!(permission, ReadEmployee | ReadTask | UpdateTask),
        _ => false,
    }
}

/// Whether a user with role `actor` may assign `target` to someone.
///
/// Only a super admin can create or promote another super admin.
pub fn can_assign_role(actor: &str, target: &str) -> bool {
    if target == ROLE_SUPER_ADMIN {
        return actor == ROLE_SUPER_ADMIN;
    }
    role_has_permission(actor, Permission::ManageUsers)
}
