//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Order, OrderDraft};
use crate::export::{self, ExportRow};
use crate::orders::DateRange;
use crate::utils::{AppError, AppResponse, AppResult, ok, time};

/// Query params for searching orders
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Order number prefix; empty matches everything
    #[serde(default)]
    pub order_no: String,
    /// YYYY-MM-DD; the date filter applies only when both bounds are set
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Create response payload
#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    pub id: String,
}

/// List all orders, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

/// Search orders by number prefix and/or date window
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let range = DateRange {
        start: query.start_date.as_deref().map(time::parse_date).transpose()?,
        end: query.end_date.as_deref().map(time::parse_date).transpose()?,
    };
    let orders = state.orders.search_orders(&query.order_no, range).await?;
    Ok(Json(orders))
}

/// Spreadsheet summary rows for the external exporter
pub async fn export(State(state): State<ServerState>) -> AppResult<Json<Vec<ExportRow>>> {
    let orders = state.orders.list_orders().await?;
    let rows = export::summary_rows(&orders, state.orders.timezone());
    Ok(Json(rows))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .get_order(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// Create an order with its line items
pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<OrderDraft>,
) -> AppResult<Json<CreatedOrder>> {
    let id = state.orders.create_order(draft).await?;
    Ok(Json(CreatedOrder { id }))
}

/// Replace an order's header fields and full line-item set
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(draft): Json<OrderDraft>,
) -> AppResult<Json<AppResponse<()>>> {
    state.orders.update_order(&id, draft).await?;
    Ok(ok(()))
}

/// Delete an order and all its line items
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.orders.delete_order(&id).await?;
    Ok(ok(()))
}
