//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Look-ahead window parameter (`?days=`).
///
/// Clamped by the handler via `clamp_event_window`.
#[derive(Debug, Default, Deserialize)]
pub struct DaysParams {
    pub days: Option<i64>,
}

/// Treat an empty query value (`?status=`) the same as an absent one.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
