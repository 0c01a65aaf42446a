//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod audit_repo;
pub mod dashboard_repo;
pub mod employee_repo;
pub mod task_repo;
pub mod user_repo;

pub use audit_repo::AuditRepo;
pub use dashboard_repo::DashboardRepo;
pub use employee_repo::EmployeeRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
