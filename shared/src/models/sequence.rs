//! Document number sequences

use serde::{Deserialize, Serialize};

/// Well-known sequence names
pub const INVOICE_SEQUENCE: &str = "invoice";
pub const BATCH_SEQUENCE: &str = "batch";

/// A persisted counter backing one document number sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceCounter {
    pub name: String,
    /// Calendar-year scope for invoice numbers; `None` for global sequences
    pub scope_year: Option<i32>,
    pub counter: i64,
}

/// Invoice number format, fixed for compatibility with printed documents:
/// `INV-<4-digit year>-<4-digit zero-padded sequence>`
pub fn format_invoice_number(year: i32, counter: i64) -> String {
    format!("INV-{year}-{counter:04}")
}

/// Batch number format: `BATCH-<4-digit zero-padded sequence>`
pub fn format_batch_number(counter: i64) -> String {
    format!("BATCH-{counter:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_is_zero_padded() {
        assert_eq!(format_invoice_number(2026, 1), "INV-2026-0001");
        assert_eq!(format_invoice_number(2026, 42), "INV-2026-0042");
        assert_eq!(format_invoice_number(2026, 12345), "INV-2026-12345");
    }

    #[test]
    fn batch_number_is_zero_padded() {
        assert_eq!(format_batch_number(7), "BATCH-0007");
        assert_eq!(format_batch_number(9999), "BATCH-9999");
    }
}
