//! Cashbook ledger entries

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PaymentMode;

/// One money movement in the append-only cashbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashbookEntry {
    pub id: Uuid,
    pub entry_date: NaiveDate,
    pub entry_type: EntryType,
    /// Free-form grouping, e.g. "Sales", "Material", "Payment Received"
    pub category: String,
    pub description: String,
    /// Always positive; direction comes from `entry_type`
    pub amount: Decimal,
    pub payment_mode: Option<PaymentMode>,
    pub created_at: DateTime<Utc>,
}

/// Direction of a cashbook entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Receipt,
    Payment,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Receipt => "receipt",
            EntryType::Payment => "payment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "receipt" => Some(EntryType::Receipt),
            "payment" => Some(EntryType::Payment),
            _ => None,
        }
    }
}

/// Net cash position over a set of entries: receipts minus payments
pub fn net_position(entries: &[(EntryType, Decimal)]) -> Decimal {
    entries.iter().fold(Decimal::ZERO, |acc, (t, amt)| match t {
        EntryType::Receipt => acc + amt,
        EntryType::Payment => acc - amt,
    })
}

/// Render entries as CSV: a header line plus one row per entry
pub fn render_csv(entries: &[CashbookEntry]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["date", "type", "category", "description", "amount", "mode"])
        .map_err(|e| e.to_string())?;
    for entry in entries {
        writer
            .write_record([
                entry.entry_date.to_string(),
                entry.entry_type.as_str().to_string(),
                entry.category.clone(),
                entry.description.clone(),
                entry.amount.to_string(),
                entry
                    .payment_mode
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            ])
            .map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
