//! Audit log model and DTOs.
//!
//! Entries are immutable once written (no `updated_at`).

use hrdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    /// Acting user. `None` once that user row is gone.
    pub user_id: Option<DbId>,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<DbId>,
    pub details: serde_json::Value,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: Option<DbId>,
    pub action: &'static str,
    pub resource: &'static str,
    pub resource_id: Option<DbId>,
    pub details: serde_json::Value,
    pub user_agent: Option<String>,
}

/// Query parameters for `GET /admin/audit-logs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogParams {
    pub user_id: Option<DbId>,
    pub action: Option<String>,
    pub resource: Option<String>,
    pub resource_id: Option<DbId>,
    pub limit: Option<i64>,
}

/// Audit listing filter. Every set field narrows the result (AND).
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub user_id: Option<DbId>,
    pub action: Option<String>,
    pub resource: Option<String>,
    pub resource_id: Option<DbId>,
}
