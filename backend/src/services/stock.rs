//! Stock ledger operations for blocks and raw materials
//!
//! Every quantity change funnels through a single guarded UPDATE so the
//! non-negative invariant is enforced by the database row itself, and
//! concurrent adjustments against the same record serialize there instead of
//! racing through a read-then-write window.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::block::BlockRow;
use crate::services::material::{MaterialRow, MATERIAL_COLUMNS};
use shared::{Block, RawMaterial};

/// Stock ledger service
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Input for a manual block stock adjustment; negative for corrections out
#[derive(Debug, Deserialize)]
pub struct AdjustBlockStockInput {
    pub delta: i64,
}

/// Input for a manual material stock adjustment
#[derive(Debug, Deserialize)]
pub struct AdjustMaterialStockInput {
    pub delta: Decimal,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply a signed quantity change to a block's available stock
    pub async fn adjust_block_stock(&self, block_id: Uuid, delta: i64) -> AppResult<Block> {
        let mut conn = self.db.acquire().await?;
        Self::adjust_block_stock_on(&mut conn, block_id, delta).await
    }

    /// Same as [`adjust_block_stock`](Self::adjust_block_stock) but on an
    /// existing connection, so orchestrations can run the guard inside their
    /// own transaction
    pub async fn adjust_block_stock_on(
        conn: &mut PgConnection,
        block_id: Uuid,
        delta: i64,
    ) -> AppResult<Block> {
        let row = sqlx::query_as::<_, BlockRow>(
            r#"
            UPDATE blocks
            SET available_qty = available_qty + $2, updated_at = NOW()
            WHERE id = $1 AND available_qty + $2 >= 0
            RETURNING id, name, category, size, color, available_qty, reserved_qty,
                      price_per_unit, created_at, updated_at
            "#,
        )
        .bind(block_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => row.into_model(),
            // Zero rows: either the block is missing or the guard refused
            None => {
                let current = sqlx::query_scalar::<_, i64>(
                    "SELECT available_qty FROM blocks WHERE id = $1",
                )
                .bind(block_id)
                .fetch_optional(&mut *conn)
                .await?;

                match current {
                    Some(qty) => Err(AppError::InsufficientStock(format!(
                        "block has {} units available, cannot adjust by {}",
                        qty, delta
                    ))),
                    None => Err(AppError::NotFound("Block".to_string())),
                }
            }
        }
    }

    /// Apply a signed quantity change to a raw material's stock
    pub async fn adjust_material_stock(
        &self,
        material_id: Uuid,
        delta: Decimal,
    ) -> AppResult<RawMaterial> {
        let mut conn = self.db.acquire().await?;
        Self::adjust_material_stock_on(&mut conn, material_id, delta).await
    }

    /// Material stock guard on an existing connection
    pub async fn adjust_material_stock_on(
        conn: &mut PgConnection,
        material_id: Uuid,
        delta: Decimal,
    ) -> AppResult<RawMaterial> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "UPDATE raw_materials
             SET current_stock = current_stock + $2, updated_at = NOW()
             WHERE id = $1 AND current_stock + $2 >= 0
             RETURNING {MATERIAL_COLUMNS}"
        ))
        .bind(material_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => row.into_model(),
            None => {
                let current = sqlx::query_scalar::<_, Decimal>(
                    "SELECT current_stock FROM raw_materials WHERE id = $1",
                )
                .bind(material_id)
                .fetch_optional(&mut *conn)
                .await?;

                match current {
                    Some(stock) => Err(AppError::InsufficientStock(format!(
                        "material has {} in stock, cannot adjust by {}",
                        stock, delta
                    ))),
                    None => Err(AppError::NotFound("Material".to_string())),
                }
            }
        }
    }
}
