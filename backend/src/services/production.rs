//! Production batch service: the batch lifecycle and inventory credit

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::sequence::SequenceService;
use crate::services::stock::StockService;
use shared::{validate_positive_quantity, BatchStatus, ProductionBatch};

/// Production service
#[derive(Clone)]
pub struct ProductionService {
    db: PgPool,
}

/// Database row for a production batch
#[derive(Debug, sqlx::FromRow)]
struct BatchRow {
    id: Uuid,
    batch_number: String,
    block_id: Option<Uuid>,
    block_name: String,
    target_qty: i64,
    produced_qty: i64,
    defects: i64,
    status: String,
    cement_used: Decimal,
    sand_used: Decimal,
    aggregate_used: Decimal,
    color_used: Decimal,
    notes: Option<String>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl BatchRow {
    fn into_model(self) -> AppResult<ProductionBatch> {
        let status = BatchStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("unknown batch status: {}", self.status)))?;
        Ok(ProductionBatch {
            id: self.id,
            batch_number: self.batch_number,
            block_id: self.block_id,
            block_name: self.block_name,
            target_qty: self.target_qty,
            produced_qty: self.produced_qty,
            defects: self.defects,
            status,
            cement_used: self.cement_used,
            sand_used: self.sand_used,
            aggregate_used: self.aggregate_used,
            color_used: self.color_used,
            notes: self.notes,
            started_at: self.started_at,
            completed_at: self.completed_at,
        })
    }
}

/// Input for starting a batch
#[derive(Debug, Deserialize)]
pub struct StartBatchInput {
    pub block_id: Uuid,
    pub target_qty: i64,
    pub notes: Option<String>,
}

/// Input for recording production progress
#[derive(Debug, Deserialize)]
pub struct RecordProductionInput {
    pub added_qty: i64,
    pub defects: Option<i64>,
    /// Material consumption for this run, added to the batch totals
    pub cement_used: Option<Decimal>,
    pub sand_used: Option<Decimal>,
    pub aggregate_used: Option<Decimal>,
    pub color_used: Option<Decimal>,
}

const BATCH_COLUMNS: &str = "id, batch_number, block_id, block_name, target_qty, produced_qty, \
                             defects, status, cement_used, sand_used, aggregate_used, color_used, \
                             notes, started_at, completed_at";

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Start a new batch targeting a block type
    ///
    /// The batch number allocation and the insert share one transaction, so
    /// a failed insert does not burn a number.
    pub async fn start_batch(&self, input: StartBatchInput) -> AppResult<ProductionBatch> {
        validate_positive_quantity(input.target_qty)
            .map_err(|msg| AppError::validation("target_qty", msg))?;

        let block_name = sqlx::query_scalar::<_, String>("SELECT name FROM blocks WHERE id = $1")
            .bind(input.block_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Block".to_string()))?;

        let mut tx = self.db.begin().await?;

        let batch_number = SequenceService::next_batch_number_on(&mut tx).await?;

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "INSERT INTO production_batches
                 (batch_number, block_id, block_name, target_qty, produced_qty, defects, status,
                  cement_used, sand_used, aggregate_used, color_used, notes, started_at)
             VALUES ($1, $2, $3, $4, 0, 0, 'in_progress', 0, 0, 0, 0, $5, NOW())
             RETURNING {BATCH_COLUMNS}"
        ))
        .bind(&batch_number)
        .bind(input.block_id)
        .bind(&block_name)
        .bind(input.target_qty)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Started production batch {}", batch_number);
        row.into_model()
    }

    /// Record produced units against an in-progress batch
    ///
    /// Over-production beyond the target is allowed; progress display clamps
    /// at 100% but the stored quantity does not.
    pub async fn record_production(
        &self,
        batch_id: Uuid,
        input: RecordProductionInput,
    ) -> AppResult<ProductionBatch> {
        validate_positive_quantity(input.added_qty)
            .map_err(|msg| AppError::validation("added_qty", msg))?;
        if input.defects.is_some_and(|d| d < 0) {
            return Err(AppError::validation("defects", "Defects cannot be negative"));
        }

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "UPDATE production_batches
             SET produced_qty = produced_qty + $2,
                 defects = defects + $3,
                 cement_used = cement_used + $4,
                 sand_used = sand_used + $5,
                 aggregate_used = aggregate_used + $6,
                 color_used = color_used + $7
             WHERE id = $1 AND status = 'in_progress'
             RETURNING {BATCH_COLUMNS}"
        ))
        .bind(batch_id)
        .bind(input.added_qty)
        .bind(input.defects.unwrap_or(0))
        .bind(input.cement_used.unwrap_or(Decimal::ZERO))
        .bind(input.sand_used.unwrap_or(Decimal::ZERO))
        .bind(input.aggregate_used.unwrap_or(Decimal::ZERO))
        .bind(input.color_used.unwrap_or(Decimal::ZERO))
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => row.into_model(),
            None => Err(self.not_in_progress_error(batch_id, "record production on").await?),
        }
    }

    /// Pause an in-progress batch
    pub async fn pause_batch(&self, batch_id: Uuid) -> AppResult<ProductionBatch> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "UPDATE production_batches
             SET status = 'paused'
             WHERE id = $1 AND status = 'in_progress'
             RETURNING {BATCH_COLUMNS}"
        ))
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => row.into_model(),
            None => Err(self.not_in_progress_error(batch_id, "pause").await?),
        }
    }

    /// Resuming a paused batch is not wired up: what a resumed batch should
    /// do (carry its old progress? restart?) is an open product question, so
    /// the transition is rejected rather than guessed at.
    pub async fn resume_batch(&self, batch_id: Uuid) -> AppResult<ProductionBatch> {
        let status = self.batch_status(batch_id).await?;
        match status {
            BatchStatus::Paused => Err(AppError::InvalidStateTransition(
                "resuming a paused batch is not supported yet".to_string(),
            )),
            other => Err(AppError::InvalidStateTransition(format!(
                "cannot resume a batch in status {}",
                other.as_str()
            ))),
        }
    }

    /// Complete a batch and credit the produced units to block stock
    ///
    /// The status flip and the stock credit share one transaction: if the
    /// credit fails the batch stays in progress. The status guard also means
    /// a batch can only ever be completed once.
    pub async fn complete_batch(&self, batch_id: Uuid) -> AppResult<ProductionBatch> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "UPDATE production_batches
             SET status = 'complete', completed_at = NOW()
             WHERE id = $1 AND status = 'in_progress'
             RETURNING {BATCH_COLUMNS}"
        ))
        .bind(batch_id)
        .fetch_optional(&mut *tx)
        .await?;

        let batch = match row {
            Some(row) => row.into_model()?,
            None => {
                let err = self.not_in_progress_error(batch_id, "complete").await?;
                return Err(err);
            }
        };

        if let (Some(block_id), produced) = (batch.block_id, batch.produced_qty) {
            if produced > 0 {
                StockService::adjust_block_stock_on(&mut tx, block_id, produced).await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Completed batch {} with {} units produced",
            batch.batch_number,
            batch.produced_qty
        );
        Ok(batch)
    }

    /// Get a batch by id
    pub async fn get_batch(&self, batch_id: Uuid) -> AppResult<ProductionBatch> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {BATCH_COLUMNS} FROM production_batches WHERE id = $1"
        ))
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        row.into_model()
    }

    /// List all batches, newest first
    pub async fn list_batches(&self) -> AppResult<Vec<ProductionBatch>> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {BATCH_COLUMNS} FROM production_batches ORDER BY started_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(BatchRow::into_model).collect()
    }

    async fn batch_status(&self, batch_id: Uuid) -> AppResult<BatchStatus> {
        let status =
            sqlx::query_scalar::<_, String>("SELECT status FROM production_batches WHERE id = $1")
                .bind(batch_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        BatchStatus::parse(&status)
            .ok_or_else(|| AppError::Internal(format!("unknown batch status: {status}")))
    }

    /// Build the error for a guarded update that matched no row: the batch is
    /// either missing or not in progress
    async fn not_in_progress_error(&self, batch_id: Uuid, verb: &str) -> AppResult<AppError> {
        let status = self.batch_status(batch_id).await?;
        Ok(AppError::InvalidStateTransition(format!(
            "cannot {} a batch in status {}",
            verb,
            status.as_str()
        )))
    }
}
