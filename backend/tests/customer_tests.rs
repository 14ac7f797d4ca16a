//! Customer account tests
//!
//! Covers dues collection bounds, aggregate bookkeeping across a sale and
//! the identity validations on customer records.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{validate_gst_number, validate_phone};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A collection is accepted only when it fits inside the pending dues
    #[test]
    fn test_collection_cannot_exceed_dues() {
        let dues = dec("3250");

        assert!(dec("3250") <= dues);
        assert!(dec("1000") <= dues);
        assert!(!(dec("3250.01") <= dues));
    }

    /// A credit sale then a collection: total_business keeps the full sale,
    /// dues shrink by what was collected
    #[test]
    fn test_aggregates_across_sale_and_collection() {
        let mut total_business = Decimal::ZERO;
        let mut pending_dues = Decimal::ZERO;

        // Sale of 5250 with 2000 paid up front
        let total = dec("5250");
        let paid = dec("2000");
        total_business += total;
        pending_dues += (total - paid).max(Decimal::ZERO);

        assert_eq!(total_business, dec("5250"));
        assert_eq!(pending_dues, dec("3250"));

        // Later collection of 3000
        let collection = dec("3000");
        assert!(collection <= pending_dues);
        pending_dues -= collection;

        assert_eq!(total_business, dec("5250"));
        assert_eq!(pending_dues, dec("250"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("98765").is_err());
        assert!(validate_phone("98765432101").is_err());
    }

    #[test]
    fn test_gst_validation() {
        assert!(validate_gst_number("27AAPFU0939F1ZV").is_ok());
        assert!(validate_gst_number("27AAPFU0939F1Z").is_err());
        assert!(validate_gst_number("AAAAPFU0939F1ZV").is_err());
        assert!(validate_gst_number("27AAPFU0939F1Z!").is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    /// Applying only collections that fit keeps dues non-negative
    #[test]
    fn dues_never_go_negative(
        opening in money_strategy(),
        collections in prop::collection::vec(money_strategy(), 0..20),
    ) {
        let mut dues = opening;
        for c in collections {
            if c > Decimal::ZERO && c <= dues {
                dues -= c;
            }
        }
        prop_assert!(dues >= Decimal::ZERO);
    }

    /// total_business only grows; collections never touch it
    #[test]
    fn total_business_is_monotonic(sales in prop::collection::vec(money_strategy(), 0..20)) {
        let mut total = Decimal::ZERO;
        let mut last = total;
        for s in sales {
            total += s;
            prop_assert!(total >= last);
            last = total;
        }
    }

    /// Valid 10-digit phones pass with or without the +91 prefix
    #[test]
    fn phone_accepts_ten_digits(digits in "[1-9][0-9]{9}") {
        prop_assert!(validate_phone(&digits).is_ok());
        let prefixed = format!("+91{}", digits);
        prop_assert!(validate_phone(&prefixed).is_ok());
    }

    /// Valid-shaped GSTINs pass the format check
    #[test]
    fn gst_accepts_valid_shape(
        state in 10u8..38,
        body in "[A-Z0-9]{13}",
    ) {
        let gst = format!("{state:02}{body}");
        prop_assert!(validate_gst_number(&gst).is_ok());
    }
}
