//! Database Module
//!
//! Owns the embedded SurrealDB handle. The client is constructed
//! explicitly at startup and injected into the repositories — no ambient
//! singleton.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "orders";
const DATABASE: &str = "orders";

/// Tables and indexes required by the order aggregate. `order_no` carries a
/// unique index; `order_date` and `order_item.order_id` are lookup indexes
/// for search and item correlation.
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS order;
    DEFINE INDEX IF NOT EXISTS order_no_unique ON order FIELDS order_no UNIQUE;
    DEFINE INDEX IF NOT EXISTS order_date_idx ON order FIELDS order_date;
    DEFINE TABLE IF NOT EXISTS order_item;
    DEFINE INDEX IF NOT EXISTS order_item_order_idx ON order_item FIELDS order_id;
    DEFINE TABLE IF NOT EXISTS counter;
"#;

/// Database service — owns the embedded SurrealDB instance
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at the given path
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self::prepare(db).await?;
        tracing::info!(path = %path.display(), "Database connection established");
        Ok(service)
    }

    /// Open an in-memory database (tests)
    pub async fn open_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        Ok(Self { db })
    }
}
