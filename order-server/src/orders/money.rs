//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done in `Decimal`; `f64` only exists at the
//! storage/serialization boundary. Values are rounded to 2 decimal places
//! with half-away-from-zero rounding.

use rust_decimal::prelude::*;

use crate::db::models::LineItemDraft;
use crate::orders::OrderError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per unit
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Line subtotal: qty * price, rounded to 2 places
pub fn line_subtotal(qty: i32, price: f64) -> f64 {
    to_f64(to_decimal(price) * Decimal::from(qty))
}

/// Grand total: sum of already-rounded subtotals, rounded to 2 places
pub fn order_total(subtotals: impl IntoIterator<Item = f64>) -> f64 {
    let total: Decimal = subtotals.into_iter().map(to_decimal).sum();
    to_f64(total)
}

/// Validate a draft line item before any computation or write
pub fn validate_line(item: &LineItemDraft, index: usize) -> Result<(), OrderError> {
    if !item.price.is_finite() {
        return Err(OrderError::Validation(format!(
            "products[{index}].price must be a finite number, got {}",
            item.price
        )));
    }
    if item.price < 0.0 {
        return Err(OrderError::Validation(format!(
            "products[{index}].price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(OrderError::Validation(format!(
            "products[{index}].price exceeds maximum allowed ({MAX_PRICE}), got {}",
            item.price
        )));
    }

    if item.qty <= 0 {
        return Err(OrderError::Validation(format!(
            "products[{index}].qty must be positive, got {}",
            item.qty
        )));
    }
    if item.qty > MAX_QUANTITY {
        return Err(OrderError::Validation(format!(
            "products[{index}].qty exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            item.qty
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_line_subtotal_rounds_half_away_from_zero() {
        // 3 * 10.999 = 32.997 → 33.00
        assert_eq!(line_subtotal(3, 10.999), 33.0);
        // 0.005 boundary rounds up
        assert_eq!(line_subtotal(1, 0.005), 0.01);
        // 0.004 rounds down
        assert_eq!(line_subtotal(1, 0.004), 0.0);
    }

    #[test]
    fn test_line_subtotal_plain() {
        assert_eq!(line_subtotal(3, 10.99), 32.97);
        assert_eq!(line_subtotal(1, 0.0), 0.0);
    }

    #[test]
    fn test_order_total_accumulation() {
        // 100 subtotals of 0.01 sum to exactly 1.00
        let total = order_total(std::iter::repeat(0.01).take(100));
        assert_eq!(total, 1.0);
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_validate_line_rejects_bad_values() {
        let base = LineItemDraft {
            product_name: "Widget".to_string(),
            qty: 1,
            price: 10.0,
        };

        assert!(validate_line(&base, 0).is_ok());

        let mut item = base.clone();
        item.qty = 0;
        assert!(validate_line(&item, 0).is_err());

        let mut item = base.clone();
        item.qty = -2;
        assert!(validate_line(&item, 0).is_err());

        let mut item = base.clone();
        item.price = -0.01;
        assert!(validate_line(&item, 0).is_err());

        let mut item = base.clone();
        item.price = f64::NAN;
        assert!(validate_line(&item, 0).is_err());

        let mut item = base.clone();
        item.price = MAX_PRICE + 1.0;
        assert!(validate_line(&item, 0).is_err());

        let mut item = base;
        item.qty = MAX_QUANTITY + 1;
        assert!(validate_line(&item, 0).is_err());
    }
}
