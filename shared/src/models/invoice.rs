//! Sales invoices and line items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PaymentMode;

/// A sales invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    /// Format `INV-<year>-<4-digit-seq>`, unique across the system
    pub invoice_number: String,
    /// Absent for walk-in sales
    pub customer_id: Option<Uuid>,
    pub subtotal: Decimal,
    pub transport_cost: Decimal,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_mode: Option<PaymentMode>,
    pub vehicle_id: Option<Uuid>,
    pub delivery_address: Option<String>,
    pub delivery_status: DeliveryStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
}

/// One line of an invoice
///
/// `block_name` is a snapshot taken at sale time so the invoice survives the
/// referenced block being renamed or deleted later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub block_id: Option<Uuid>,
    pub block_name: String,
    pub quantity: i64,
    pub rate: Decimal,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payment status, derived from amounts rather than stored independently
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Pending,
}

impl PaymentStatus {
    /// Derive the status from what was paid against what is owed
    pub fn derive(amount_paid: Decimal, total_amount: Decimal) -> Self {
        if amount_paid >= total_amount {
            PaymentStatus::Paid
        } else if amount_paid > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(PaymentStatus::Paid),
            "partial" => Some(PaymentStatus::Partial),
            "pending" => Some(PaymentStatus::Pending),
            _ => None,
        }
    }
}

/// Delivery status of an invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DeliveryStatus::Pending),
            "in_transit" => Some(DeliveryStatus::InTransit),
            "delivered" => Some(DeliveryStatus::Delivered),
            _ => None,
        }
    }
}

/// Amount of a single line: quantity x rate
pub fn line_amount(quantity: i64, rate: Decimal) -> Decimal {
    Decimal::from(quantity) * rate
}

/// Subtotal over (quantity, rate) pairs
pub fn subtotal_of(lines: &[(i64, Decimal)]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, (qty, rate)| acc + line_amount(*qty, *rate))
}

/// Invoice total: subtotal plus transport
pub fn total_with_transport(subtotal: Decimal, transport_cost: Decimal) -> Decimal {
    subtotal + transport_cost
}
