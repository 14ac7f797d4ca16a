//! Cashbook service: the append-only ledger of money movements

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_positive_amount, CashbookEntry, EntryType, PaymentMode};

/// Cashbook service
#[derive(Clone)]
pub struct CashbookService {
    db: PgPool,
}

/// Database row for a cashbook entry
#[derive(Debug, sqlx::FromRow)]
struct CashbookRow {
    id: Uuid,
    entry_date: NaiveDate,
    entry_type: String,
    category: String,
    description: String,
    amount: Decimal,
    payment_mode: Option<String>,
    created_at: DateTime<Utc>,
}

impl CashbookRow {
    fn into_model(self) -> AppResult<CashbookEntry> {
        let entry_type = EntryType::parse(&self.entry_type)
            .ok_or_else(|| AppError::Internal(format!("unknown entry type: {}", self.entry_type)))?;
        let payment_mode = match self.payment_mode.as_deref() {
            Some(m) => Some(
                PaymentMode::parse(m)
                    .ok_or_else(|| AppError::Internal(format!("unknown payment mode: {m}")))?,
            ),
            None => None,
        };
        Ok(CashbookEntry {
            id: self.id,
            entry_date: self.entry_date,
            entry_type,
            category: self.category,
            description: self.description,
            amount: self.amount,
            payment_mode,
            created_at: self.created_at,
        })
    }
}

/// Input for a manual cashbook entry
#[derive(Debug, Deserialize)]
pub struct CreateEntryInput {
    pub entry_date: Option<NaiveDate>,
    pub entry_type: EntryType,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub payment_mode: Option<PaymentMode>,
}

/// Filter for listing entries
#[derive(Debug, Default, Deserialize)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub entry_type: Option<EntryType>,
}

/// Receipts against payments over a period
#[derive(Debug, Clone, Serialize)]
pub struct CashbookSummary {
    pub total_receipts: Decimal,
    pub total_payments: Decimal,
    pub net_in_hand: Decimal,
}

const CASHBOOK_COLUMNS: &str =
    "id, entry_date, entry_type, category, description, amount, payment_mode, created_at";

impl CashbookService {
    /// Create a new CashbookService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append a manual entry to the ledger
    pub async fn create_entry(&self, input: CreateEntryInput) -> AppResult<CashbookEntry> {
        validate_positive_amount(input.amount)
            .map_err(|msg| AppError::validation("amount", msg))?;
        if input.category.trim().is_empty() {
            return Err(AppError::validation("category", "Category is required"));
        }

        let mut conn = self.db.acquire().await?;
        Self::insert_entry_on(
            &mut conn,
            input.entry_date.unwrap_or_else(|| Utc::now().date_naive()),
            input.entry_type,
            input.category.trim(),
            input.description.trim(),
            input.amount,
            input.payment_mode,
        )
        .await
    }

    /// Append an entry on an existing connection; used by the sales, dues and
    /// purchase workflows so the ledger write commits with the rest of the
    /// transaction
    pub async fn insert_entry_on(
        conn: &mut PgConnection,
        entry_date: NaiveDate,
        entry_type: EntryType,
        category: &str,
        description: &str,
        amount: Decimal,
        payment_mode: Option<PaymentMode>,
    ) -> AppResult<CashbookEntry> {
        let row = sqlx::query_as::<_, CashbookRow>(&format!(
            "INSERT INTO cashbook_entries (entry_date, entry_type, category, description, amount, payment_mode)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CASHBOOK_COLUMNS}"
        ))
        .bind(entry_date)
        .bind(entry_type.as_str())
        .bind(category)
        .bind(description)
        .bind(amount)
        .bind(payment_mode.map(|m| m.as_str()))
        .fetch_one(&mut *conn)
        .await?;

        row.into_model()
    }

    /// List entries, newest first, optionally bounded by date and type
    pub async fn list_entries(&self, filter: EntryFilter) -> AppResult<Vec<CashbookEntry>> {
        let rows = sqlx::query_as::<_, CashbookRow>(&format!(
            "SELECT {CASHBOOK_COLUMNS} FROM cashbook_entries
             WHERE ($1::date IS NULL OR entry_date >= $1)
               AND ($2::date IS NULL OR entry_date <= $2)
               AND ($3::text IS NULL OR entry_type = $3)
             ORDER BY entry_date DESC, created_at DESC"
        ))
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.entry_type.map(|t| t.as_str()))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(CashbookRow::into_model).collect()
    }

    /// Receipts, payments and net position over an optional date range
    pub async fn summary(&self, filter: EntryFilter) -> AppResult<CashbookSummary> {
        let (receipts, payments) = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT COALESCE(SUM(CASE WHEN entry_type = 'receipt' THEN amount ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN entry_type = 'payment' THEN amount ELSE 0 END), 0)
            FROM cashbook_entries
            WHERE ($1::date IS NULL OR entry_date >= $1)
              AND ($2::date IS NULL OR entry_date <= $2)
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(&self.db)
        .await?;

        Ok(CashbookSummary {
            total_receipts: receipts,
            total_payments: payments,
            net_in_hand: receipts - payments,
        })
    }

    /// Export entries as CSV, one row per ledger entry
    pub async fn export_csv(&self, filter: EntryFilter) -> AppResult<String> {
        let entries = self.list_entries(filter).await?;
        shared::render_csv(&entries).map_err(AppError::Internal)
    }
}
