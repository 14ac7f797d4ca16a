//! End-to-end workflow arithmetic tests
//!
//! Walks the bookkeeping of the two core workflows, sale and production,
//! through the same steps the services perform and checks every side effect
//! lands where it should.

use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    line_amount, progress_percent, total_with_transport, BatchStatus, EntryType, PaymentStatus,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Fully paid cash sale: 10 Paver-A at 50, nothing on credit
#[test]
fn test_cash_sale_side_effects() {
    let mut available_qty = 100i64;
    let price = dec("50");
    let mut ledger: Vec<(EntryType, Decimal)> = Vec::new();

    // One line, no transport, 500 paid up front
    let qty = 10i64;
    let amount = line_amount(qty, price);
    let total = total_with_transport(amount, Decimal::ZERO);
    let paid = dec("500");

    assert_eq!(total, dec("500"));
    assert_eq!(PaymentStatus::derive(paid, total), PaymentStatus::Paid);

    // Stock decrement passes the guard
    assert!(available_qty >= qty);
    available_qty -= qty;
    assert_eq!(available_qty, 90);

    // Receipt for what was paid
    ledger.push((EntryType::Receipt, paid));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].1, dec("500"));
}

/// Credit sale: 200 paid against 500, the rest becomes pending dues
#[test]
fn test_credit_sale_increases_dues() {
    let total = dec("500");
    let paid = dec("200");

    assert_eq!(PaymentStatus::derive(paid, total), PaymentStatus::Partial);

    let mut pending_dues = Decimal::ZERO;
    pending_dues += (total - paid).max(Decimal::ZERO);
    assert_eq!(pending_dues, dec("300"));

    let mut total_business = Decimal::ZERO;
    total_business += total;
    assert_eq!(total_business, dec("500"));
}

/// Batch to completion: start, produce to target, complete, stock credited
#[test]
fn test_batch_completion_credits_stock() {
    let mut available_qty = 100i64;
    let target = 50i64;
    let mut produced = 0i64;
    let mut status = BatchStatus::InProgress;
    let mut completed_at: Option<&str> = None;

    produced += 50;
    assert_eq!(progress_percent(produced, target), 100);

    assert!(status.can_transition_to(BatchStatus::Complete));
    status = BatchStatus::Complete;
    completed_at = Some("now");
    available_qty += produced;

    assert_eq!(status, BatchStatus::Complete);
    assert_eq!(available_qty, 150);
    assert!(completed_at.is_some());

    // A second completion attempt finds the guard closed
    assert!(!status.can_transition_to(BatchStatus::Complete));
}

/// A failed step mid-sale rolls everything back: no partial side effects
#[test]
fn test_sale_is_all_or_nothing() {
    let available_qty = 100i64;
    let ledger_len = 0usize;
    let pending_dues = Decimal::ZERO;

    // Demand exceeds stock, so the sale is rejected before any write
    let wanted = 120i64;
    let accepted = available_qty >= wanted;
    assert!(!accepted);

    // Every side effect is untouched
    assert_eq!(available_qty, 100);
    assert_eq!(ledger_len, 0);
    assert_eq!(pending_dues, Decimal::ZERO);
}
