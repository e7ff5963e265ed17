//! Monetary Conversion Helpers
//!
//! Uses rust_decimal for precise calculations, stores as f64 on the wire.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for the wire, rounded to 2 decimal places
#[inline]
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(2345, 3)), 2.35); // 2.345
        assert_eq!(to_f64(Decimal::new(-2345, 3)), -2.35);
        assert_eq!(to_f64(Decimal::new(10, 0)), 10.0);
    }

    #[test]
    fn test_non_finite_input_degrades_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
