//! Customer accounts and outstanding dues

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer of the factory
///
/// `total_business` and `pending_dues` are running aggregates maintained
/// incrementally by the sales and dues-collection workflows. `total_business`
/// only ever grows; `pending_dues` never drops below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    /// Cumulative value of every invoice billed to this customer
    pub total_business: Decimal,
    /// Outstanding balance still owed
    pub pending_dues: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
