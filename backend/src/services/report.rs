//! Dashboard report: the day-at-a-glance numbers the factory runs on

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::material::{MaterialRow, MATERIAL_COLUMNS};
use shared::RawMaterial;

/// Report service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

/// The dashboard snapshot
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    /// Receipts dated today
    pub today_revenue: Decimal,
    /// Payments dated today
    pub today_expenses: Decimal,
    /// Receipts minus payments over the whole ledger
    pub net_in_hand: Decimal,
    /// Sum of pending dues across customers
    pub total_pending_dues: Decimal,
    /// Materials at or below their reorder level
    pub low_stock_materials: Vec<RawMaterial>,
    /// Batches currently in progress
    pub batches_in_progress: i64,
    /// Invoices not yet delivered
    pub pending_deliveries: i64,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Assemble the dashboard snapshot
    pub async fn dashboard(&self) -> AppResult<DashboardReport> {
        let (today_revenue, today_expenses) = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT COALESCE(SUM(CASE WHEN entry_type = 'receipt' THEN amount ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN entry_type = 'payment' THEN amount ELSE 0 END), 0)
            FROM cashbook_entries
            WHERE entry_date = CURRENT_DATE
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let (total_receipts, total_payments) = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT COALESCE(SUM(CASE WHEN entry_type = 'receipt' THEN amount ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN entry_type = 'payment' THEN amount ELSE 0 END), 0)
            FROM cashbook_entries
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let total_pending_dues = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(pending_dues), 0) FROM customers",
        )
        .fetch_one(&self.db)
        .await?;

        let low_stock_rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM raw_materials
             WHERE current_stock <= min_stock_level
             ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await?;
        let low_stock_materials = low_stock_rows
            .into_iter()
            .map(MaterialRow::into_model)
            .collect::<AppResult<Vec<_>>>()?;

        let batches_in_progress = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM production_batches WHERE status = 'in_progress'",
        )
        .fetch_one(&self.db)
        .await?;

        let pending_deliveries = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invoices WHERE delivery_status <> 'delivered'",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardReport {
            today_revenue,
            today_expenses,
            net_in_hand: total_receipts - total_payments,
            total_pending_dues,
            low_stock_materials,
            batches_in_progress,
            pending_deliveries,
        })
    }
}
