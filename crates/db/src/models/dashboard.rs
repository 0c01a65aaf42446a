//! Aggregate rows for the dashboard endpoints.

use serde::Serialize;
use sqlx::FromRow;

/// Task counters for `GET /dashboard/stats`.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct TaskStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    /// Not completed and due before today.
    pub overdue: i64,
    /// Not completed and due between today and the end of the upcoming window.
    pub upcoming: i64,
}

/// Employee count for one status value.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
