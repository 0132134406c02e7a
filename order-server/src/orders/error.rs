//! Order service error types

use crate::utils::AppError;

/// Errors surfaced by the order service facade
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Rejected before any write
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Update/delete targeting a missing order
    #[error("{0}")]
    NotFound(String),

    /// Explicit order number collided with an existing one
    #[error("{0}")]
    Conflict(String),

    /// Order number generation exhausted its retries; create aborted with
    /// no partial write
    #[error("Order number generation failed: {0}")]
    Sequence(String),

    /// Store write failed; the transactional batches guarantee no partial
    /// header/item state remains
    #[error("{operation} failed: {message}")]
    Persistence {
        operation: &'static str,
        message: String,
    },

    /// Store call exceeded its deadline. Safe to retry for reads; a create
    /// retry must go through the facade again so the order number is
    /// regenerated, never reused.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::NotFound(msg) => AppError::NotFound(msg),
            OrderError::Conflict(msg) => AppError::Conflict(msg),
            OrderError::Sequence(msg) => AppError::Database(msg),
            OrderError::Persistence { operation, message } => {
                AppError::Database(format!("{operation}: {message}"))
            }
            OrderError::Timeout {
                operation,
                timeout_ms,
            } => AppError::Timeout(format!("{operation} exceeded {timeout_ms}ms")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error_kinds() {
        assert!(matches!(
            AppError::from(OrderError::Validation("qty".into())),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(OrderError::NotFound("order x".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(OrderError::Timeout {
                operation: "create",
                timeout_ms: 100
            }),
            AppError::Timeout(_)
        ));
    }
}
