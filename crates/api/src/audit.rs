//! Audit trail writes from request handlers.

use hrdesk_core::types::DbId;
use hrdesk_db::models::audit::CreateAuditLog;
use hrdesk_db::repositories::AuditRepo;
use hrdesk_db::DbPool;

use crate::middleware::auth::AuthUser;

/// Append an audit entry for an action `actor` has just completed.
///
/// The action already happened, so a failed write is logged and swallowed
/// rather than turned into an error response.
pub async fn record(
    pool: &DbPool,
    actor: &AuthUser,
    action: &'static str,
    resource: &'static str,
    resource_id: Option<DbId>,
    details: serde_json::Value,
) {
    let entry = CreateAuditLog {
        user_id: Some(actor.user_id),
        action,
        resource,
        resource_id,
        details,
        user_agent: actor.user_agent.clone(),
    };
    if let Err(e) = AuditRepo::record(pool, &entry).await {
        tracing::error!(error = %e, action, resource_id, "Failed to write audit log");
    }
}
