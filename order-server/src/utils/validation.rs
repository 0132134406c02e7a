//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen as reasonable UX bounds; the document store itself
//! enforces no text length.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer and product names
pub const MAX_NAME_LEN: usize = 200;

/// Order numbers (generated ones are 15-16 chars; allow imports)
pub const MAX_ORDER_NO_LEN: usize = 64;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is non-empty and within the
/// length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_required_text(v, field, max_len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty_and_whitespace() {
        assert!(validate_required_text("", "customer_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "customer_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Budi", "customer_name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_required_text_rejects_overlong() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "customer_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text_absent_is_ok() {
        assert!(validate_optional_text(&None, "order_no", MAX_ORDER_NO_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("".to_string()), "order_no", MAX_ORDER_NO_LEN).is_err()
        );
    }
}
