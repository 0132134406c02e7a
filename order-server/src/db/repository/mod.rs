//! Repository Module
//!
//! CRUD and search over the embedded SurrealDB store. Multi-statement
//! writes run inside `BEGIN TRANSACTION … COMMIT TRANSACTION` batches so a
//! header is never durable without its line items.

pub mod order;
pub mod sequence;

pub use order::OrderRepository;
pub use sequence::OrderNumberGenerator;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Marker thrown inside transactions when the target header does not exist
pub(crate) const NOT_FOUND_MARKER: &str = "order_not_found";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.contains(NOT_FOUND_MARKER) {
            RepoError::NotFound(msg)
        } else if msg.contains("already contains") {
            // Unique index violation
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Collect every statement error in a multi-statement response.
///
/// A cancelled transaction reports the triggering error on one statement
/// and a generic cancellation error on the rest, in no guaranteed order, so
/// classification has to look at all of them.
pub(crate) fn check_response(mut response: surrealdb::Response) -> RepoResult<surrealdb::Response> {
    let errors = response.take_errors();
    if errors.is_empty() {
        return Ok(response);
    }

    let mut messages: Vec<String> = errors.into_values().map(|e| e.to_string()).collect();
    messages.sort();
    let combined = messages.join("; ");
    if combined.contains(NOT_FOUND_MARKER) {
        Err(RepoError::NotFound(combined))
    } else if combined.contains("already contains") {
        Err(RepoError::Duplicate(combined))
    } else {
        Err(RepoError::Database(combined))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
