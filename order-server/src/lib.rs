//! Order Server — order management backend
//!
//! Purchase orders (header + line items) over an embedded document
//! database, with day-scoped sequential order numbers, filtered search,
//! and a spreadsheet export boundary.
//!
//! # Module structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # Configuration, server state
//! ├── server/        # HTTP server, middleware, shutdown
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded database, models, repositories
//! ├── orders/        # Service facade, money rules
//! ├── export/        # Spreadsheet summary rows
//! └── utils/         # Errors, logging, time, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod export;
pub mod orders;
pub mod server;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, ServerState};
pub use db::DbService;
pub use db::models::{LineItemDraft, Order, OrderDraft, OrderLineItem};
pub use orders::{DateRange, OrderError, OrderService};
pub use server::Server;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
