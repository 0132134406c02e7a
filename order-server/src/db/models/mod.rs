//! Database models

pub mod order;

pub use order::{
    LineItemDraft, LineItemWrite, Order, OrderDraft, OrderHeader, OrderLineItem, OrderPatch,
};
