//! Free-text filter helpers shared by the employee and task listings.
//!
//! Listings use `ILIKE` substring matching rather than full-text search;
//! the helpers here turn raw user input into safe patterns.

// ---------------------------------------------------------------------------
// Pattern helpers
// ---------------------------------------------------------------------------

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `%`, `_` and `\` in the input are escaped so they match literally.
/// Blank input returns `None` (no filter).
///
/// # Examples
///
/// ```
/// use hrdesk_core::search::like_pattern;
/// assert_eq!(like_pattern("laptop"), Some("%laptop%".to_string()));
/// assert_eq!(like_pattern(" 100% "), Some("%100\\%%".to_string()));
/// assert_eq!(like_pattern("   "), None);
/// ```
pub fn like_pattern(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a_b"), Some("%a\\_b%".to_string()));
        assert_eq!(like_pattern("c:\\tmp"), Some("%c:\\\\tmp%".to_string()));
    }

    #[test]
    fn like_pattern_trims_input() {
        assert_eq!(like_pattern("  exit "), Some("%exit%".to_string()));
    }
}
