//! Order domain — service facade and money rules
//!
//! The facade is the only write path: it validates drafts, recomputes all
//! totals, attaches generated order numbers, and delegates to the
//! repository under a deadline.

pub mod error;
pub mod money;
pub mod service;

pub use error::OrderError;
pub use service::{DateRange, OrderService};
