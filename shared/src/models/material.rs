//! Raw materials consumed by block production

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw material tracked in stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMaterial {
    pub id: Uuid,
    pub name: String,
    pub category: MaterialCategory,
    pub unit: MaterialUnit,
    /// Current stock level; never negative
    pub current_stock: Decimal,
    /// Reorder threshold; stock at or below this level is flagged low
    pub min_stock_level: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RawMaterial {
    /// Whether the material needs reordering
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock_level
    }
}

/// Raw material categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Cement,
    Sand,
    Aggregate,
    Color,
    Other,
}

impl MaterialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Cement => "cement",
            MaterialCategory::Sand => "sand",
            MaterialCategory::Aggregate => "aggregate",
            MaterialCategory::Color => "color",
            MaterialCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cement" => Some(MaterialCategory::Cement),
            "sand" => Some(MaterialCategory::Sand),
            "aggregate" => Some(MaterialCategory::Aggregate),
            "color" => Some(MaterialCategory::Color),
            "other" => Some(MaterialCategory::Other),
            _ => None,
        }
    }
}

/// Units raw materials are measured in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialUnit {
    Bags,
    Kg,
    Tons,
}

impl MaterialUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialUnit::Bags => "bags",
            MaterialUnit::Kg => "kg",
            MaterialUnit::Tons => "tons",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bags" => Some(MaterialUnit::Bags),
            "kg" => Some(MaterialUnit::Kg),
            "tons" => Some(MaterialUnit::Tons),
            _ => None,
        }
    }
}
