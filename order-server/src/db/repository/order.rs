//! Order Repository
//!
//! CRUD and search over the two-collection aggregate: `order` headers and
//! their `order_item` rows. Every mutation runs as one
//! `BEGIN TRANSACTION … COMMIT TRANSACTION` batch, so the header and its
//! items are durable together or not at all. Update and delete check
//! existence inside the transaction and `THROW` a marker for missing ids
//! instead of silently no-opping.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, check_response};
use crate::db::models::{LineItemWrite, Order, OrderHeader, OrderPatch};

/// Shared projection: header fields plus the correlated item list,
/// ordered by insertion position.
const ORDER_PROJECTION: &str = r#"
    <string>id AS id,
    order_no,
    customer_name,
    order_date,
    grand_total,
    (
        SELECT
            <string>id AS id,
            order_id,
            product_name,
            qty,
            price,
            subtotal,
            position
        FROM order_item
        WHERE order_id = <string>$parent.id
        ORDER BY position
    ) AS products
"#;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first (ties broken by order_no for a stable order)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let query = format!(
            "SELECT {ORDER_PROJECTION} FROM order ORDER BY order_date DESC, order_no DESC"
        );
        let orders: Vec<Order> = self.base.db().query(query).await?.take(0)?;
        Ok(orders)
    }

    /// Fetch one order with its items. Missing and malformed ids both
    /// resolve to `None`.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let Ok(record) = id.parse::<RecordId>() else {
            return Ok(None);
        };

        let query = format!("SELECT {ORDER_PROJECTION} FROM order WHERE id = $id");
        let orders: Vec<Order> = self
            .base
            .db()
            .query(query)
            .bind(("id", record))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Filtered search, newest first.
    ///
    /// - `order_no_prefix`: when non-empty, prefix match on `order_no`.
    /// - `date_window`: `[start, end)` in Unix millis, applied when present.
    ///
    /// Both filters AND together.
    pub async fn search(
        &self,
        order_no_prefix: &str,
        date_window: Option<(i64, i64)>,
    ) -> RepoResult<Vec<Order>> {
        let mut conditions: Vec<&str> = Vec::new();
        if !order_no_prefix.is_empty() {
            conditions.push("string::starts_with(order_no, $prefix)");
        }
        if date_window.is_some() {
            conditions.push("order_date >= $start AND order_date < $end");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {ORDER_PROJECTION} FROM order{where_clause} ORDER BY order_date DESC, order_no DESC"
        );

        let mut request = self.base.db().query(query);
        if !order_no_prefix.is_empty() {
            request = request.bind(("prefix", order_no_prefix.to_string()));
        }
        if let Some((start, end)) = date_window {
            request = request.bind(("start", start)).bind(("end", end));
        }

        let orders: Vec<Order> = request.await?.take(0)?;
        Ok(orders)
    }

    /// Create the header and all items as one atomic batch.
    ///
    /// The store assigns the header id inside the transaction and every
    /// item is tagged with it; a failed item write rolls the header back.
    /// Returns the new id as "order:key".
    pub async fn create(
        &self,
        header: OrderHeader,
        items: Vec<LineItemWrite>,
    ) -> RepoResult<String> {
        let query = r#"
            BEGIN TRANSACTION;
            LET $created = (CREATE order CONTENT $header);
            LET $order_id = <string>$created[0].id;
            FOR $item IN $items {
                CREATE order_item CONTENT {
                    order_id: $order_id,
                    product_name: $item.product_name,
                    qty: $item.qty,
                    price: $item.price,
                    subtotal: $item.subtotal,
                    position: $item.position,
                };
            };
            RETURN $order_id;
            COMMIT TRANSACTION;
        "#;

        let mut response = check_response(
            self.base
                .db()
                .query(query)
                .bind(("header", header))
                .bind(("items", items))
                .await?,
        )?;

        let last = response.num_statements() - 1;
        let id: Option<String> = response.take(last)?;
        id.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Replace header fields and the full line-item set as one atomic batch.
    ///
    /// `order_no` is immutable and never touched. Fails with `NotFound`
    /// when the header does not exist.
    pub async fn update(
        &self,
        id: &str,
        patch: OrderPatch,
        items: Vec<LineItemWrite>,
    ) -> RepoResult<()> {
        let record: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid order ID format: {}", id)))?;

        let query = r#"
            BEGIN TRANSACTION;
            LET $existing = (SELECT id FROM $order);
            IF array::len($existing) = 0 { THROW 'order_not_found' };
            UPDATE $order SET
                customer_name = $customer_name,
                order_date = $order_date,
                grand_total = $grand_total;
            DELETE order_item WHERE order_id = $order_id;
            FOR $item IN $items {
                CREATE order_item CONTENT {
                    order_id: $order_id,
                    product_name: $item.product_name,
                    qty: $item.qty,
                    price: $item.price,
                    subtotal: $item.subtotal,
                    position: $item.position,
                };
            };
            COMMIT TRANSACTION;
        "#;

        let response = self
            .base
            .db()
            .query(query)
            .bind(("order", record.clone()))
            .bind(("order_id", record.to_string()))
            .bind(("customer_name", patch.customer_name))
            .bind(("order_date", patch.order_date))
            .bind(("grand_total", patch.grand_total))
            .bind(("items", items))
            .await?;

        check_response(response).map_err(|e| not_found_as(e, id))?;
        Ok(())
    }

    /// Delete all items referencing the order, then the header, as one
    /// atomic batch. Fails with `NotFound` when the header does not exist.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid order ID format: {}", id)))?;

        let query = r#"
            BEGIN TRANSACTION;
            LET $existing = (SELECT id FROM $order);
            IF array::len($existing) = 0 { THROW 'order_not_found' };
            DELETE order_item WHERE order_id = $order_id;
            DELETE $order;
            COMMIT TRANSACTION;
        "#;

        let response = self
            .base
            .db()
            .query(query)
            .bind(("order", record.clone()))
            .bind(("order_id", record.to_string()))
            .await?;

        check_response(response).map_err(|e| not_found_as(e, id))?;
        Ok(())
    }
}

/// Rewrite the transaction's thrown marker into a caller-friendly NotFound
fn not_found_as(err: RepoError, id: &str) -> RepoError {
    match err {
        RepoError::NotFound(_) => RepoError::NotFound(format!("Order {} not found", id)),
        other => other,
    }
}
