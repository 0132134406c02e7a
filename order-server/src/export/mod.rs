//! Export boundary
//!
//! Flattens consistent, fully-populated orders into spreadsheet summary
//! rows. The artifact encoding (workbook, styling, currency format) is the
//! external exporter's concern; this module only guarantees the row list
//! is complete, ordered, and consistent.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::db::models::Order;

/// One spreadsheet row per order
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub order_no: String,
    pub customer_name: String,
    /// Display-formatted in the business timezone, e.g. "05 Aug 2026"
    pub order_date: String,
    pub grand_total: f64,
}

/// Map orders (already sorted by the repository) to export rows
pub fn summary_rows(orders: &[Order], tz: Tz) -> Vec<ExportRow> {
    orders
        .iter()
        .map(|order| ExportRow {
            order_no: order.order_no.clone(),
            customer_name: order.customer_name.clone(),
            order_date: format_display_date(order.order_date, tz),
            grand_total: order.grand_total,
        })
        .collect()
}

/// Unix millis → "dd Mon yyyy" in the business timezone
fn format_display_date(millis: i64, tz: Tz) -> String {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
        .format("%d %b %Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(order_no: &str, customer: &str, millis: i64, total: f64) -> Order {
        Order {
            id: Some(format!("order:{}", order_no)),
            order_no: order_no.to_string(),
            customer_name: customer.to_string(),
            order_date: millis,
            grand_total: total,
            products: vec![],
        }
    }

    #[test]
    fn test_summary_rows_preserve_order_and_fields() {
        // 2024-01-15 12:00:00 UTC
        let millis = 1_705_320_000_000;
        let orders = vec![
            order("INV20240115-002", "Siti", millis, 150.5),
            order("INV20240115-001", "Budi", millis, 99.99),
        ];

        let rows = summary_rows(&orders, chrono_tz::UTC);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_no, "INV20240115-002");
        assert_eq!(rows[0].customer_name, "Siti");
        assert_eq!(rows[0].order_date, "15 Jan 2024");
        assert_eq!(rows[1].grand_total, 99.99);
    }

    #[test]
    fn test_display_date_uses_business_timezone() {
        // 2024-01-15 23:30 UTC is already Jan 16 in Jakarta
        let millis = 1_705_361_400_000;
        assert_eq!(format_display_date(millis, chrono_tz::UTC), "15 Jan 2024");
        assert_eq!(
            format_display_date(millis, chrono_tz::Asia::Jakarta),
            "16 Jan 2024"
        );
    }
}
