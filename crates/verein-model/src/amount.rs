//! Contribution amount parsing and rendering.
//!
//! Amounts are kept as [`rust_decimal::Decimal`] throughout the pipeline so
//! that grouping keys and control sums compare exactly, never through binary
//! floating point.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{ModelError, Result};

/// Parse a contribution amount from a cell or CLI string.
///
/// Accepts both `10.50` and the German decimal-comma form `10,50`.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ModelError::InvalidAmount(raw.to_string()))
}

/// Reject zero and negative amounts at the configuration boundary.
pub fn ensure_positive(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(ModelError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Render an amount with exactly two fraction digits, as the document expects.
pub fn format_amount(amount: Decimal) -> String {
    let mut rendered = amount;
    rendered.rescale(2);
    rendered.to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_parse_amount_dot() {
        assert_eq!(parse_amount("10.50").unwrap(), Decimal::new(1050, 2));
    }

    #[test]
    fn test_parse_amount_comma() {
        assert_eq!(parse_amount(" 10,50 ").unwrap(), Decimal::new(1050, 2));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("ten euros").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive(Decimal::new(1, 2)).is_ok());
        assert!(ensure_positive(Decimal::ZERO).is_err());
        assert!(ensure_positive(Decimal::new(-100, 2)).is_err());
    }

    #[test]
    fn test_format_amount_pads_fraction_digits() {
        assert_eq!(format_amount(Decimal::new(10, 0)), "10.00");
        assert_eq!(format_amount(Decimal::new(1050, 2)), "10.50");
    }
}
