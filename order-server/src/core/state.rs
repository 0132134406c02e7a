//! Server state — explicitly constructed services shared across handlers

use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{OrderNumberGenerator, OrderRepository};
use crate::orders::OrderService;
use crate::utils::time::{Clock, SystemClock};

/// Server state — holds the shared handles for all services
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | db | Surreal<Db> | Embedded database |
/// | orders | OrderService | Order facade (repository + generator) |
///
/// Cloning is shallow; every handler gets the same underlying handles.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub orders: OrderService,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Ensures the work directory exists, opens the embedded database at
    /// `work_dir/database/orders.db`, and wires the repository, number
    /// generator, and service facade around it.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("orders.db");
        let db_service = DbService::open(&db_path)
            .await
            .expect("Failed to initialize database");

        Self::from_parts(config.clone(), db_service.db, Arc::new(SystemClock))
    }

    /// Wire the state from an existing database handle and clock
    /// (tests inject the in-memory engine and a fixed clock here)
    pub fn from_parts(config: Config, db: Surreal<Db>, clock: Arc<dyn Clock>) -> Self {
        let repo = OrderRepository::new(db.clone());
        let sequence = OrderNumberGenerator::new(
            db.clone(),
            clock,
            config.timezone,
            config.sequence_max_retries,
        );
        let orders = OrderService::new(
            repo,
            sequence,
            config.timezone,
            Duration::from_millis(config.request_timeout_ms),
        );

        Self { config, db, orders }
    }

    /// Shared database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
