//! Sales and invoicing tests
//!
//! Covers invoice arithmetic, payment status derivation, customer aggregate
//! updates and the stock sufficiency check that gates a sale.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use shared::{
    format_invoice_number, line_amount, subtotal_of, total_with_transport, would_go_negative,
    PaymentStatus,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A worked sale: 100 pavers at 45 plus 40 bricks at 12.5, 250 transport
    #[test]
    fn test_invoice_totals() {
        let lines = [(100i64, dec("45")), (40, dec("12.5"))];
        let subtotal = subtotal_of(&lines);
        assert_eq!(subtotal, dec("5000"));

        let total = total_with_transport(subtotal, dec("250"));
        assert_eq!(total, dec("5250"));
    }

    #[test]
    fn test_line_amount_is_qty_times_rate() {
        assert_eq!(line_amount(12, dec("7.25")), dec("87"));
        assert_eq!(line_amount(0, dec("99")), Decimal::ZERO);
    }

    /// Nothing paid -> pending, part paid -> partial, fully covered -> paid
    #[test]
    fn test_payment_status_boundaries() {
        let total = dec("5250");
        assert_eq!(
            PaymentStatus::derive(Decimal::ZERO, total),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentStatus::derive(dec("0.01"), total),
            PaymentStatus::Partial
        );
        assert_eq!(
            PaymentStatus::derive(dec("5249.99"), total),
            PaymentStatus::Partial
        );
        assert_eq!(PaymentStatus::derive(total, total), PaymentStatus::Paid);
        assert_eq!(
            PaymentStatus::derive(dec("6000"), total),
            PaymentStatus::Paid
        );
    }

    /// The dues increment is total minus paid, floored at zero so an
    /// overpayment cannot drive pending_dues negative
    #[test]
    fn test_dues_increment_floors_at_zero() {
        let total = dec("5250");

        let partial = (total - dec("2000")).max(Decimal::ZERO);
        assert_eq!(partial, dec("3250"));

        let overpaid = (total - dec("6000")).max(Decimal::ZERO);
        assert_eq!(overpaid, Decimal::ZERO);
    }

    /// Two lines against the same block must be checked as one demand:
    /// each line alone clears the stock guard, the aggregate does not
    #[test]
    fn test_stock_check_aggregates_duplicate_blocks() {
        let block = Uuid::from_u128(7);
        let available = 100i64;
        let items = [(block, 60i64), (block, 50)];

        let mut demand: HashMap<Uuid, i64> = HashMap::new();
        for (id, qty) in items {
            *demand.entry(id).or_insert(0) += qty;
        }

        for (_, qty) in items {
            assert!(!would_go_negative(available, -qty));
        }
        assert!(would_go_negative(available, -demand[&block]));
    }

    #[test]
    fn test_invoice_number_format() {
        assert_eq!(format_invoice_number(2026, 1), "INV-2026-0001");
        assert_eq!(format_invoice_number(2026, 731), "INV-2026-0731");
        assert_eq!(format_invoice_number(2027, 10000), "INV-2027-10000");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn line_strategy() -> impl Strategy<Value = (i64, Decimal)> {
    (1i64..10_000, money_strategy())
}

/// Two overlapping sets of block ids, each in arbitrary item order
fn two_demand_sets() -> impl Strategy<Value = (Vec<Uuid>, Vec<Uuid>)> {
    prop::collection::btree_set(any::<u128>(), 4..10)
        .prop_map(|pool| pool.into_iter().map(Uuid::from_u128).collect::<Vec<_>>())
        .prop_flat_map(|pool| {
            let n = pool.len();
            (
                prop::sample::subsequence(pool.clone(), 2..=n).prop_shuffle(),
                prop::sample::subsequence(pool, 2..=n).prop_shuffle(),
            )
        })
}

proptest! {
    /// The subtotal equals the sum of the individual line amounts
    #[test]
    fn subtotal_is_sum_of_lines(lines in prop::collection::vec(line_strategy(), 1..10)) {
        let subtotal = subtotal_of(&lines);
        let manual: Decimal = lines.iter().map(|(q, r)| line_amount(*q, *r)).sum();
        prop_assert_eq!(subtotal, manual);
    }

    /// Adding transport never lowers the total
    #[test]
    fn transport_never_lowers_total(sub in money_strategy(), transport in money_strategy()) {
        prop_assert!(total_with_transport(sub, transport) >= sub);
    }

    /// Payment status is consistent with the amounts that derived it
    #[test]
    fn payment_status_matches_amounts(paid in money_strategy(), total in money_strategy()) {
        match PaymentStatus::derive(paid, total) {
            PaymentStatus::Paid => prop_assert!(paid >= total),
            PaymentStatus::Partial => prop_assert!(paid > Decimal::ZERO && paid < total),
            PaymentStatus::Pending => prop_assert!(paid <= Decimal::ZERO),
        }
    }

    /// The floored dues increment is never negative and never exceeds total
    #[test]
    fn dues_increment_bounds(paid in money_strategy(), total in money_strategy()) {
        let delta = (total - paid).max(Decimal::ZERO);
        prop_assert!(delta >= Decimal::ZERO);
        prop_assert!(delta <= total);
    }

    /// Two sales that sort their block demands by id lock shared blocks in
    /// the same relative order, whatever order the items arrived in, so
    /// neither sale can end up waiting on the other in a cycle
    #[test]
    fn sorted_demand_gives_one_global_lock_order((mut a, mut b) in two_demand_sets()) {
        a.sort();
        b.sort();

        let shared_in_a: Vec<&Uuid> = a.iter().filter(|id| b.contains(id)).collect();
        let shared_in_b: Vec<&Uuid> = b.iter().filter(|id| a.contains(id)).collect();
        prop_assert_eq!(shared_in_a, shared_in_b);
    }
}
