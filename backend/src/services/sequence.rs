//! Document number sequences for invoices and production batches
//!
//! Numbers come from persisted counters bumped by a single upsert statement,
//! so concurrent callers always receive distinct, contiguous values. The
//! invoice sequence is scoped to the calendar year and restarts at 1 when the
//! year rolls over; the batch sequence is global.

use chrono::{Datelike, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::AppResult;
use shared::{format_batch_number, format_invoice_number, BATCH_SEQUENCE, INVOICE_SEQUENCE};

/// Sequence generator service
#[derive(Clone)]
pub struct SequenceService {
    db: PgPool,
}

impl SequenceService {
    /// Create a new SequenceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Allocate the next invoice number, e.g. `INV-2026-0001`
    pub async fn next_invoice_number(&self) -> AppResult<String> {
        let mut conn = self.db.acquire().await?;
        Self::next_invoice_number_on(&mut conn).await
    }

    /// Invoice number allocation on an existing connection; inside a
    /// transaction the counter bump commits or rolls back with the caller,
    /// so an aborted sale never burns a number
    pub async fn next_invoice_number_on(conn: &mut PgConnection) -> AppResult<String> {
        let year = Utc::now().year();
        let counter = Self::bump(conn, INVOICE_SEQUENCE, Some(year)).await?;
        Ok(format_invoice_number(year, counter))
    }

    /// Allocate the next batch number, e.g. `BATCH-0001`
    pub async fn next_batch_number(&self) -> AppResult<String> {
        let mut conn = self.db.acquire().await?;
        Self::next_batch_number_on(&mut conn).await
    }

    /// Batch number allocation on an existing connection
    pub async fn next_batch_number_on(conn: &mut PgConnection) -> AppResult<String> {
        let counter = Self::bump(conn, BATCH_SEQUENCE, None).await?;
        Ok(format_batch_number(counter))
    }

    /// Atomically increment a named counter and return its new value.
    /// A scope change (new calendar year) resets the counter to 1.
    async fn bump(
        conn: &mut PgConnection,
        name: &str,
        scope_year: Option<i32>,
    ) -> AppResult<i64> {
        let counter = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sequence_counters (name, scope_year, counter)
            VALUES ($1, $2, 1)
            ON CONFLICT (name) DO UPDATE
            SET counter = CASE
                    WHEN sequence_counters.scope_year IS NOT DISTINCT FROM EXCLUDED.scope_year
                        THEN sequence_counters.counter + 1
                    ELSE 1
                END,
                scope_year = EXCLUDED.scope_year
            RETURNING counter
            "#,
        )
        .bind(name)
        .bind(scope_year)
        .fetch_one(&mut *conn)
        .await?;

        Ok(counter)
    }
}
