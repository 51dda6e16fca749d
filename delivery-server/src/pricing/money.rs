//! Amount Arithmetic
//!
//! Uses rust_decimal for precise calculations, stores as f64.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

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

/// Order total over `(unit_price, quantity)` lines.
///
/// Accumulates in Decimal so repeated f64 addition can never drift the
/// stored total away from Σ(quantity × price).
pub fn order_total<I: IntoIterator<Item = (f64, i64)>>(lines: I) -> f64 {
    let mut total = Decimal::ZERO;
    for (unit_price, quantity) in lines {
        total += to_decimal(unit_price) * Decimal::from(quantity);
    }
    to_f64(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_quantity_times_price() {
        // 2 × 5.00 + 1 × 3.00 = 13.00
        let total = order_total([(5.00, 2), (3.00, 1)]);
        assert_eq!(total, 13.00);
    }

    #[test]
    fn empty_lines_total_zero() {
        assert_eq!(order_total([]), 0.0);
    }

    #[test]
    fn fractional_prices_do_not_drift() {
        // 0.1 + 0.2 style accumulation stays exact under Decimal
        let total = order_total([(0.10, 1), (0.20, 1), (1.1, 3)]);
        assert_eq!(total, 3.60);
    }

    #[test]
    fn rounds_half_up_to_two_places() {
        // 1.005 -> 1.01 under MidpointAwayFromZero
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
    }
}
