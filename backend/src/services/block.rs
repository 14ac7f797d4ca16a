//! Block catalog service for managing finished-goods products

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_name, validate_non_negative_amount, Block, BlockCategory};

/// Block service for the product catalog
#[derive(Clone)]
pub struct BlockService {
    db: PgPool,
}

/// Database row for a block
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BlockRow {
    id: Uuid,
    name: String,
    category: String,
    size: Option<String>,
    color: Option<String>,
    available_qty: i64,
    reserved_qty: i64,
    price_per_unit: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BlockRow {
    pub(crate) fn into_model(self) -> AppResult<Block> {
        let category = BlockCategory::parse(&self.category)
            .ok_or_else(|| AppError::Internal(format!("unknown block category: {}", self.category)))?;
        Ok(Block {
            id: self.id,
            name: self.name,
            category,
            size: self.size,
            color: self.color,
            available_qty: self.available_qty,
            reserved_qty: self.reserved_qty,
            price_per_unit: self.price_per_unit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating a block
#[derive(Debug, Deserialize)]
pub struct CreateBlockInput {
    pub name: String,
    pub category: BlockCategory,
    pub size: Option<String>,
    pub color: Option<String>,
    pub available_qty: Option<i64>,
    pub price_per_unit: Decimal,
}

/// Input for updating a block
///
/// Stock levels are deliberately absent; quantity changes go through the
/// stock ledger so the non-negative guard always applies.
#[derive(Debug, Deserialize)]
pub struct UpdateBlockInput {
    pub name: Option<String>,
    pub category: Option<BlockCategory>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price_per_unit: Option<Decimal>,
}

const BLOCK_COLUMNS: &str = "id, name, category, size, color, available_qty, reserved_qty, \
                             price_per_unit, created_at, updated_at";

impl BlockService {
    /// Create a new BlockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a block product
    pub async fn create_block(&self, input: CreateBlockInput) -> AppResult<Block> {
        validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        validate_non_negative_amount(input.price_per_unit)
            .map_err(|msg| AppError::validation("price_per_unit", msg))?;
        let initial_qty = input.available_qty.unwrap_or(0);
        if initial_qty < 0 {
            return Err(AppError::validation(
                "available_qty",
                "Opening stock cannot be negative",
            ));
        }

        let row = sqlx::query_as::<_, BlockRow>(&format!(
            "INSERT INTO blocks (name, category, size, color, available_qty, price_per_unit)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {BLOCK_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(input.category.as_str())
        .bind(&input.size)
        .bind(&input.color)
        .bind(initial_qty)
        .bind(input.price_per_unit)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Get a block by id
    pub async fn get_block(&self, block_id: Uuid) -> AppResult<Block> {
        let row = sqlx::query_as::<_, BlockRow>(&format!(
            "SELECT {BLOCK_COLUMNS} FROM blocks WHERE id = $1"
        ))
        .bind(block_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Block".to_string()))?;

        row.into_model()
    }

    /// List all blocks, newest first
    pub async fn list_blocks(&self) -> AppResult<Vec<Block>> {
        let rows = sqlx::query_as::<_, BlockRow>(&format!(
            "SELECT {BLOCK_COLUMNS} FROM blocks ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(BlockRow::into_model).collect()
    }

    /// Update catalog fields of a block
    pub async fn update_block(&self, block_id: Uuid, input: UpdateBlockInput) -> AppResult<Block> {
        let existing = self.get_block(block_id).await?;

        let name = match input.name {
            Some(n) => {
                validate_name(&n).map_err(|msg| AppError::validation("name", msg))?;
                n.trim().to_string()
            }
            None => existing.name,
        };
        let price = input.price_per_unit.unwrap_or(existing.price_per_unit);
        validate_non_negative_amount(price)
            .map_err(|msg| AppError::validation("price_per_unit", msg))?;
        let category = input.category.unwrap_or(existing.category);

        let row = sqlx::query_as::<_, BlockRow>(&format!(
            "UPDATE blocks
             SET name = $1, category = $2, size = $3, color = $4, price_per_unit = $5,
                 updated_at = NOW()
             WHERE id = $6
             RETURNING {BLOCK_COLUMNS}"
        ))
        .bind(&name)
        .bind(category.as_str())
        .bind(input.size.or(existing.size))
        .bind(input.color.or(existing.color))
        .bind(price)
        .bind(block_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a block
    ///
    /// Invoice items keep their denormalized block_name; their block_id is
    /// nulled out by the foreign key.
    pub async fn delete_block(&self, block_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM blocks WHERE id = $1")
            .bind(block_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Block".to_string()));
        }

        Ok(())
    }
}
