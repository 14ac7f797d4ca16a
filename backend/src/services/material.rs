//! Raw material stores service: catalog, purchases and low-stock flags

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cashbook::CashbookService;
use crate::services::stock::StockService;
use shared::{
    validate_name, validate_non_negative_amount, validate_positive_amount, EntryType,
    MaterialCategory, MaterialUnit, PaymentMode, RawMaterial,
};

/// Raw material service
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Database row for a raw material
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MaterialRow {
    id: Uuid,
    name: String,
    category: String,
    unit: String,
    current_stock: Decimal,
    min_stock_level: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MaterialRow {
    pub(crate) fn into_model(self) -> AppResult<RawMaterial> {
        let category = MaterialCategory::parse(&self.category).ok_or_else(|| {
            AppError::Internal(format!("unknown material category: {}", self.category))
        })?;
        let unit = MaterialUnit::parse(&self.unit)
            .ok_or_else(|| AppError::Internal(format!("unknown material unit: {}", self.unit)))?;
        Ok(RawMaterial {
            id: self.id,
            name: self.name,
            category,
            unit,
            current_stock: self.current_stock,
            min_stock_level: self.min_stock_level,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating a raw material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub name: String,
    pub category: MaterialCategory,
    pub unit: MaterialUnit,
    pub current_stock: Option<Decimal>,
    pub min_stock_level: Decimal,
    pub notes: Option<String>,
}

/// Input for updating a raw material
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub category: Option<MaterialCategory>,
    pub unit: Option<MaterialUnit>,
    pub min_stock_level: Option<Decimal>,
    pub notes: Option<String>,
}

/// Input for recording a material purchase
#[derive(Debug, Deserialize)]
pub struct RecordPurchaseInput {
    pub quantity: Decimal,
    pub total_cost: Decimal,
    pub supplier: Option<String>,
    pub payment_mode: Option<PaymentMode>,
}

pub(crate) const MATERIAL_COLUMNS: &str =
    "id, name, category, unit, current_stock, min_stock_level, notes, created_at, updated_at";

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a raw material
    pub async fn create_material(&self, input: CreateMaterialInput) -> AppResult<RawMaterial> {
        validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        let opening = input.current_stock.unwrap_or(Decimal::ZERO);
        validate_non_negative_amount(opening)
            .map_err(|msg| AppError::validation("current_stock", msg))?;
        validate_non_negative_amount(input.min_stock_level)
            .map_err(|msg| AppError::validation("min_stock_level", msg))?;

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "INSERT INTO raw_materials (name, category, unit, current_stock, min_stock_level, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {MATERIAL_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(input.category.as_str())
        .bind(input.unit.as_str())
        .bind(opening)
        .bind(input.min_stock_level)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Get a raw material by id
    pub async fn get_material(&self, material_id: Uuid) -> AppResult<RawMaterial> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM raw_materials WHERE id = $1"
        ))
        .bind(material_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        row.into_model()
    }

    /// List all raw materials, newest first
    pub async fn list_materials(&self) -> AppResult<Vec<RawMaterial>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM raw_materials ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MaterialRow::into_model).collect()
    }

    /// List materials at or below their reorder threshold
    pub async fn low_stock_materials(&self) -> AppResult<Vec<RawMaterial>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM raw_materials
             WHERE current_stock <= min_stock_level
             ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MaterialRow::into_model).collect()
    }

    /// Update catalog fields of a raw material
    ///
    /// `current_stock` is not editable here; stock moves through purchases
    /// and ledger adjustments so the non-negative guard always applies.
    pub async fn update_material(
        &self,
        material_id: Uuid,
        input: UpdateMaterialInput,
    ) -> AppResult<RawMaterial> {
        let existing = self.get_material(material_id).await?;

        let name = match input.name {
            Some(n) => {
                validate_name(&n).map_err(|msg| AppError::validation("name", msg))?;
                n.trim().to_string()
            }
            None => existing.name,
        };
        let min_stock = input.min_stock_level.unwrap_or(existing.min_stock_level);
        validate_non_negative_amount(min_stock)
            .map_err(|msg| AppError::validation("min_stock_level", msg))?;

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "UPDATE raw_materials
             SET name = $1, category = $2, unit = $3, min_stock_level = $4, notes = $5,
                 updated_at = NOW()
             WHERE id = $6
             RETURNING {MATERIAL_COLUMNS}"
        ))
        .bind(&name)
        .bind(input.category.unwrap_or(existing.category).as_str())
        .bind(input.unit.unwrap_or(existing.unit).as_str())
        .bind(min_stock)
        .bind(input.notes.or(existing.notes))
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a raw material
    pub async fn delete_material(&self, material_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM raw_materials WHERE id = $1")
            .bind(material_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }

    /// Record a purchase: stock goes up and the cashbook gets a payment entry,
    /// both inside one transaction
    pub async fn record_purchase(
        &self,
        material_id: Uuid,
        input: RecordPurchaseInput,
    ) -> AppResult<RawMaterial> {
        if input.quantity <= Decimal::ZERO {
            return Err(AppError::validation(
                "quantity",
                "Purchase quantity must be positive",
            ));
        }
        validate_positive_amount(input.total_cost)
            .map_err(|msg| AppError::validation("total_cost", msg))?;

        let mut tx = self.db.begin().await?;

        let material =
            StockService::adjust_material_stock_on(&mut tx, material_id, input.quantity).await?;

        let supplier_note = input
            .supplier
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!(" from {}", s.trim()))
            .unwrap_or_default();
        let description = format!(
            "{} purchase - {} {}{}",
            material.name,
            input.quantity,
            material.unit.as_str(),
            supplier_note
        );

        CashbookService::insert_entry_on(
            &mut tx,
            Utc::now().date_naive(),
            EntryType::Payment,
            "Material",
            &description,
            input.total_cost,
            Some(input.payment_mode.unwrap_or(PaymentMode::Cash)),
        )
        .await?;

        tx.commit().await?;

        Ok(material)
    }
}
