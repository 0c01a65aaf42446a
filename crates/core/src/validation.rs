//! Field checks that the `validator` derive does not cover.
//!
//! Email shape is checked by `#[validate(email)]` on the request DTOs.

use crate::error::CoreError;

/// Reject blank required text fields.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
