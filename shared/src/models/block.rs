//! Interlock block products and stock

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A block product held in factory inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub name: String,
    pub category: BlockCategory,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Units available for sale; never negative
    pub available_qty: i64,
    /// Units reserved against pending deliveries; never negative
    pub reserved_qty: i64,
    pub price_per_unit: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Block product categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    Pavers,
    Bricks,
    Designer,
}

impl BlockCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Pavers => "pavers",
            BlockCategory::Bricks => "bricks",
            BlockCategory::Designer => "designer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pavers" => Some(BlockCategory::Pavers),
            "bricks" => Some(BlockCategory::Bricks),
            "designer" => Some(BlockCategory::Designer),
            _ => None,
        }
    }
}
