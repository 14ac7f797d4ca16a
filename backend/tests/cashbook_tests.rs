//! Cashbook ledger tests
//!
//! Covers the net position arithmetic, the receipt/payment split the
//! summary endpoint reports, and the CSV export rendering.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::{net_position, render_csv, CashbookEntry, EntryType, PaymentMode};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn entry(day: u32, entry_type: EntryType, amount: Decimal, description: &str) -> CashbookEntry {
    CashbookEntry {
        id: Uuid::from_u128(day as u128),
        entry_date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
        entry_type,
        category: "Sales".to_string(),
        description: description.to_string(),
        amount,
        payment_mode: Some(PaymentMode::Cash),
        created_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_net_position() {
        let entries = [
            (EntryType::Receipt, dec("1000")),
            (EntryType::Payment, dec("400")),
        ];
        assert_eq!(net_position(&entries), dec("600"));

        // Spending more than came in goes negative
        let entries = [
            (EntryType::Receipt, dec("200")),
            (EntryType::Payment, dec("450")),
        ];
        assert_eq!(net_position(&entries), dec("-250"));
    }

    #[test]
    fn test_entry_type_round_trip() {
        assert_eq!(EntryType::parse("receipt"), Some(EntryType::Receipt));
        assert_eq!(EntryType::parse("payment"), Some(EntryType::Payment));
        assert_eq!(EntryType::parse("transfer"), None);
        assert_eq!(EntryType::Receipt.as_str(), "receipt");
        assert_eq!(EntryType::Payment.as_str(), "payment");
    }

    /// A day in the life: sale receipt, dues receipt, material payment
    #[test]
    fn test_daily_summary_split() {
        let entries = [
            (EntryType::Receipt, dec("5250")),
            (EntryType::Receipt, dec("2000")),
            (EntryType::Payment, dec("1800")),
        ];

        let receipts: Decimal = entries
            .iter()
            .filter(|(t, _)| *t == EntryType::Receipt)
            .map(|(_, a)| *a)
            .sum();
        let payments: Decimal = entries
            .iter()
            .filter(|(t, _)| *t == EntryType::Payment)
            .map(|(_, a)| *a)
            .sum();

        assert_eq!(receipts, dec("7250"));
        assert_eq!(payments, dec("1800"));
        assert_eq!(net_position(&entries), receipts - payments);
    }

    /// A material purchase books the negotiated total as one payment; stock
    /// moves by the purchased quantity, cash only by total_cost
    #[test]
    fn test_purchase_books_exact_total_cost() {
        let quantity = dec("100");
        let total_cost = dec("34500");

        let ledger = [(EntryType::Payment, total_cost)];
        assert_eq!(net_position(&ledger), -total_cost);

        let mut stock = dec("20");
        stock += quantity;
        assert_eq!(stock, dec("120"));
    }

    /// The export carries a header line plus exactly one row per entry
    #[test]
    fn test_csv_export_has_one_row_per_entry() {
        let entries = [
            entry(1, EntryType::Receipt, dec("5250"), "INV-2026-0001 - Ravi"),
            entry(2, EntryType::Payment, dec("1800"), "Cement purchase"),
            entry(3, EntryType::Receipt, dec("2000"), "Dues collected"),
        ];

        let csv = render_csv(&entries).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), entries.len() + 1);
        assert_eq!(lines[0], "date,type,category,description,amount,mode");
        assert_eq!(lines[1], "2026-08-01,receipt,Sales,INV-2026-0001 - Ravi,5250,cash");
        assert_eq!(lines[2], "2026-08-02,payment,Sales,Cement purchase,1800,cash");
    }

    /// An empty range still exports the header
    #[test]
    fn test_csv_export_of_nothing_is_header_only() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv.lines().collect::<Vec<_>>(), ["date,type,category,description,amount,mode"]);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn entry_strategy() -> impl Strategy<Value = (EntryType, Decimal)> {
    (
        prop_oneof![Just(EntryType::Receipt), Just(EntryType::Payment)],
        amount_strategy(),
    )
}

proptest! {
    /// Net position equals receipts minus payments however the entries are
    /// interleaved
    #[test]
    fn net_is_receipts_minus_payments(entries in prop::collection::vec(entry_strategy(), 0..40)) {
        let receipts: Decimal = entries
            .iter()
            .filter(|(t, _)| *t == EntryType::Receipt)
            .map(|(_, a)| *a)
            .sum();
        let payments: Decimal = entries
            .iter()
            .filter(|(t, _)| *t == EntryType::Payment)
            .map(|(_, a)| *a)
            .sum();

        prop_assert_eq!(net_position(&entries), receipts - payments);
    }

    /// Net position is order-independent
    #[test]
    fn net_position_ignores_order(mut entries in prop::collection::vec(entry_strategy(), 0..40)) {
        let forward = net_position(&entries);
        entries.reverse();
        prop_assert_eq!(net_position(&entries), forward);
    }

    /// Row count tracks the entry count no matter how many entries export
    #[test]
    fn csv_rows_track_entry_count(amounts in prop::collection::vec(amount_strategy(), 0..30)) {
        let entries: Vec<CashbookEntry> = amounts
            .iter()
            .map(|amt| entry(10, EntryType::Receipt, *amt, "ledger entry"))
            .collect();

        let csv = render_csv(&entries).unwrap();
        prop_assert_eq!(csv.lines().count(), entries.len() + 1);
    }
}
