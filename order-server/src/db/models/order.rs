//! Order Model
//!
//! The order aggregate lives in two collections: the `order` header and its
//! `order_item` rows, linked by `order_id` (string form of the header
//! record id). Read models carry string-cast record ids; write payloads are
//! separate structs so store-assigned fields never round-trip from callers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Read models
// =============================================================================

/// Order header with its line items populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Record id as "order:key" (absent before creation)
    pub id: Option<String>,
    /// Unique, immutable, format INV<YYYYMMDD>-<NNN>
    pub order_no: String,
    pub customer_name: String,
    /// Unix millis
    pub order_date: i64,
    /// Always equals the rounded sum of line-item subtotals
    pub grand_total: f64,
    #[serde(default)]
    pub products: Vec<OrderLineItem>,
}

/// A single line item, ordered within its order by `position`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Record id as "order_item:key"
    pub id: Option<String>,
    /// Owning order, as "order:key"
    pub order_id: String,
    pub product_name: String,
    pub qty: i32,
    pub price: f64,
    /// qty * price, rounded to 2 places
    pub subtotal: f64,
    #[serde(default)]
    pub position: i32,
}

// =============================================================================
// Write payloads (repository-internal)
// =============================================================================

/// Header fields persisted on create/update
#[derive(Debug, Clone, Serialize)]
pub struct OrderHeader {
    pub order_no: String,
    pub customer_name: String,
    pub order_date: i64,
    pub grand_total: f64,
}

/// Header fields replaced on update (`order_no` is immutable)
#[derive(Debug, Clone, Serialize)]
pub struct OrderPatch {
    pub customer_name: String,
    pub order_date: i64,
    pub grand_total: f64,
}

/// Line item row persisted on create/update; the repository tags each row
/// with its owning order inside the write transaction
#[derive(Debug, Clone, Serialize)]
pub struct LineItemWrite {
    pub product_name: String,
    pub qty: i32,
    pub price: f64,
    pub subtotal: f64,
    pub position: i32,
}

// =============================================================================
// API drafts
// =============================================================================

/// Create/update payload for an order
///
/// Drafts never carry totals — `subtotal` and `grand_total` are recomputed
/// server-side from qty and price on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Explicit order number; generated when absent
    #[serde(default)]
    pub order_no: Option<String>,
    pub customer_name: String,
    pub order_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub products: Vec<LineItemDraft>,
}

/// Draft line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub product_name: String,
    pub qty: i32,
    pub price: f64,
}
