//! Repository for the `audit_logs` table.

use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditLogFilter, CreateAuditLog};

const COLUMNS: &str = "id, user_id, action, resource, resource_id, details, user_agent, created_at";

/// Append and query operations for the audit trail. There is no update or
/// delete.
pub struct AuditRepo;

impl AuditRepo {
    /// Append one entry.
    pub async fn record(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (user_id, action, resource, resource_id, details, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.user_id)
            .bind(entry.action)
            .bind(entry.resource)
            .bind(entry.resource_id)
            .bind(&entry.details)
            .bind(&entry.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Newest entries first, at most `limit` of them.
    pub async fn list(
        pool: &PgPool,
        filter: &AuditLogFilter,
        limit: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR action = $2)
               AND ($3::TEXT IS NULL OR resource = $3)
               AND ($4::BIGINT IS NULL OR resource_id = $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(filter.user_id)
            .bind(&filter.action)
            .bind(&filter.resource)
            .bind(filter.resource_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
