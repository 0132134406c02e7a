//! Order Service Facade
//!
//! Thin orchestration over the repository and the number generator:
//! validates drafts, recomputes every subtotal and the grand total
//! server-side, attaches generated order numbers, and runs every store
//! call under a deadline.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::db::models::{LineItemDraft, LineItemWrite, Order, OrderDraft, OrderHeader, OrderPatch};
use crate::db::repository::{OrderNumberGenerator, OrderRepository, RepoError, RepoResult};
use crate::orders::{OrderError, money};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_ORDER_NO_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, time};

/// Search window; the date filter applies only when both bounds are present
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    sequence: OrderNumberGenerator,
    tz: Tz,
    timeout: Duration,
}

impl OrderService {
    pub fn new(
        repo: OrderRepository,
        sequence: OrderNumberGenerator,
        tz: Tz,
        timeout: Duration,
    ) -> Self {
        Self {
            repo,
            sequence,
            tz,
            timeout,
        }
    }

    /// All orders, newest first, items populated
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.run("list orders", self.repo.find_all()).await
    }

    /// One order by id; `None` for missing or malformed ids
    pub async fn get_order(&self, id: &str) -> Result<Option<Order>, OrderError> {
        self.run("get order", self.repo.find_by_id(id)).await
    }

    /// Filtered search. An empty prefix matches everything; the date filter
    /// applies only when both bounds are present; filters AND together.
    pub async fn search_orders(
        &self,
        order_no_prefix: &str,
        range: DateRange,
    ) -> Result<Vec<Order>, OrderError> {
        let window = match (range.start, range.end) {
            (Some(start), Some(end)) => Some((
                time::day_start_millis(start, self.tz),
                time::day_end_millis(end, self.tz),
            )),
            _ => None,
        };
        self.run("search orders", self.repo.search(order_no_prefix.trim(), window))
            .await
    }

    /// Create an order with its line items as one atomic unit.
    ///
    /// Subtotals and the grand total are recomputed here; the order number
    /// is generated exactly once when the draft carries none. Returns the
    /// new id.
    pub async fn create_order(&self, draft: OrderDraft) -> Result<String, OrderError> {
        validate_draft(&draft)?;
        let (items, grand_total) = compute_items(&draft.products);

        let order_no = match &draft.order_no {
            Some(no) => no.trim().to_string(),
            None => self.generate_order_no().await?,
        };

        let header = OrderHeader {
            order_no,
            customer_name: draft.customer_name.trim().to_string(),
            order_date: draft.order_date.timestamp_millis(),
            grand_total,
        };

        let id = self.run("create order", self.repo.create(header, items)).await?;
        tracing::info!(order = %id, "Order created");
        Ok(id)
    }

    /// Replace header fields and the full line-item set.
    ///
    /// The order number is immutable and left untouched. Errors with
    /// `NotFound` when the id does not reference an existing order.
    pub async fn update_order(&self, id: &str, draft: OrderDraft) -> Result<(), OrderError> {
        validate_draft(&draft)?;
        let (items, grand_total) = compute_items(&draft.products);

        let patch = OrderPatch {
            customer_name: draft.customer_name.trim().to_string(),
            order_date: draft.order_date.timestamp_millis(),
            grand_total,
        };

        self.run("update order", self.repo.update(id, patch, items))
            .await?;
        tracing::info!(order = %id, "Order updated");
        Ok(())
    }

    /// Delete the order and all its line items as one atomic unit
    pub async fn delete_order(&self, id: &str) -> Result<(), OrderError> {
        self.run("delete order", self.repo.delete(id)).await?;
        tracing::info!(order = %id, "Order deleted");
        Ok(())
    }

    /// Business timezone (for boundary formatting, e.g. export rows)
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    async fn generate_order_no(&self) -> Result<String, OrderError> {
        match tokio::time::timeout(self.timeout, self.sequence.next_order_no()).await {
            Ok(Ok(order_no)) => Ok(order_no),
            Ok(Err(err)) => Err(OrderError::Sequence(err.to_string())),
            Err(_) => Err(OrderError::Timeout {
                operation: "generate order number",
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    /// Run a repository call under the configured deadline and map its
    /// error kinds to facade errors.
    async fn run<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = RepoResult<T>>,
    ) -> Result<T, OrderError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(RepoError::NotFound(msg))) => Err(OrderError::NotFound(msg)),
            Ok(Err(RepoError::Duplicate(msg))) => Err(OrderError::Conflict(msg)),
            Ok(Err(RepoError::Database(msg))) => Err(OrderError::Persistence {
                operation,
                message: msg,
            }),
            Err(_) => Err(OrderError::Timeout {
                operation,
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

/// Reject bad drafts before any write
fn validate_draft(draft: &OrderDraft) -> Result<(), OrderError> {
    validate_required_text(&draft.customer_name, "customer_name", MAX_NAME_LEN)
        .map_err(validation_error)?;
    validate_optional_text(&draft.order_no, "order_no", MAX_ORDER_NO_LEN)
        .map_err(validation_error)?;
    for (index, item) in draft.products.iter().enumerate() {
        validate_required_text(
            &item.product_name,
            &format!("products[{index}].product_name"),
            MAX_NAME_LEN,
        )
        .map_err(validation_error)?;
        money::validate_line(item, index)?;
    }
    Ok(())
}

fn validation_error(err: AppError) -> OrderError {
    match err {
        AppError::Validation(msg) => OrderError::Validation(msg),
        other => OrderError::Validation(other.to_string()),
    }
}

/// Compute line subtotals and the grand total with decimal arithmetic.
/// Positions preserve the caller's line order.
fn compute_items(drafts: &[LineItemDraft]) -> (Vec<LineItemWrite>, f64) {
    let items: Vec<LineItemWrite> = drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| LineItemWrite {
            product_name: draft.product_name.trim().to_string(),
            qty: draft.qty,
            price: draft.price,
            subtotal: money::line_subtotal(draft.qty, draft.price),
            position: index as i32,
        })
        .collect();

    let grand_total = money::order_total(items.iter().map(|item| item.subtotal));
    (items, grand_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::LineItemDraft;
    use chrono::Utc;

    fn draft(products: Vec<LineItemDraft>) -> OrderDraft {
        OrderDraft {
            order_no: None,
            customer_name: "Budi Santoso".to_string(),
            order_date: Utc::now(),
            products,
        }
    }

    #[test]
    fn test_compute_items_totals() {
        let (items, grand_total) = compute_items(&[
            LineItemDraft {
                product_name: "Kopi".to_string(),
                qty: 3,
                price: 10.99,
            },
            LineItemDraft {
                product_name: "Teh".to_string(),
                qty: 2,
                price: 5.005,
            },
        ]);

        assert_eq!(items[0].subtotal, 32.97);
        assert_eq!(items[1].subtotal, 10.01);
        assert_eq!(grand_total, 42.98);
        assert_eq!(items[0].position, 0);
        assert_eq!(items[1].position, 1);
    }

    #[test]
    fn test_validate_draft_rejects_empty_customer() {
        let mut d = draft(vec![]);
        d.customer_name = "  ".to_string();
        assert!(matches!(
            validate_draft(&d),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_rejects_nonpositive_qty() {
        let d = draft(vec![LineItemDraft {
            product_name: "Kopi".to_string(),
            qty: 0,
            price: 1.0,
        }]);
        assert!(matches!(
            validate_draft(&d),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_rejects_negative_price() {
        let d = draft(vec![LineItemDraft {
            product_name: "Kopi".to_string(),
            qty: 1,
            price: -1.0,
        }]);
        assert!(matches!(
            validate_draft(&d),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_accepts_empty_item_list() {
        // The data model allows zero items; the UI may enforce otherwise
        assert!(validate_draft(&draft(vec![])).is_ok());
    }
}
