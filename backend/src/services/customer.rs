//! Customer accounts service: CRUD and dues collection

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cashbook::CashbookService;
use shared::{
    validate_gst_number, validate_name, validate_phone, validate_positive_amount, Customer,
    EntryType, PaymentMode,
};

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    db: PgPool,
}

/// Database row for a customer
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CustomerRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    address: Option<String>,
    gst_number: Option<String>,
    total_business: Decimal,
    pending_dues: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    pub(crate) fn into_model(self) -> Customer {
        Customer {
            id: self.id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            gst_number: self.gst_number,
            total_business: self.total_business,
            pending_dues: self.pending_dues,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a customer
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

/// Input for updating a customer
///
/// The running aggregates are absent on purpose: `total_business` and
/// `pending_dues` only move through sales and dues collection.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

/// Input for collecting dues from a customer
#[derive(Debug, Deserialize)]
pub struct ReceivePaymentInput {
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
}

pub(crate) const CUSTOMER_COLUMNS: &str =
    "id, name, phone, address, gst_number, total_business, pending_dues, created_at, updated_at";

impl CustomerService {
    /// Create a new CustomerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a customer with zeroed aggregates
    pub async fn create_customer(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        let mut conn = self.db.acquire().await?;
        Self::insert_customer_on(&mut conn, input).await
    }

    /// Customer insert on an existing connection; the sales workflow uses
    /// this to create walk-up customers inside its transaction
    pub async fn insert_customer_on(
        conn: &mut PgConnection,
        input: CreateCustomerInput,
    ) -> AppResult<Customer> {
        validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        if let Some(phone) = input.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            validate_phone(phone).map_err(|msg| AppError::validation("phone", msg))?;
        }
        if let Some(gst) = input.gst_number.as_deref().filter(|g| !g.trim().is_empty()) {
            validate_gst_number(gst).map_err(|msg| AppError::validation("gst_number", msg))?;
        }

        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers (name, phone, address, gst_number, total_business, pending_dues)
             VALUES ($1, $2, $3, $4, 0, 0)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.gst_number)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_model())
    }

    /// Get a customer by id
    pub async fn get_customer(&self, customer_id: Uuid) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        Ok(row.into_model())
    }

    /// List all customers, newest first
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CustomerRow::into_model).collect())
    }

    /// Update contact fields of a customer
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        input: UpdateCustomerInput,
    ) -> AppResult<Customer> {
        let existing = self.get_customer(customer_id).await?;

        let name = match input.name {
            Some(n) => {
                validate_name(&n).map_err(|msg| AppError::validation("name", msg))?;
                n.trim().to_string()
            }
            None => existing.name,
        };
        let phone = input.phone.or(existing.phone);
        if let Some(p) = phone.as_deref().filter(|p| !p.trim().is_empty()) {
            validate_phone(p).map_err(|msg| AppError::validation("phone", msg))?;
        }
        let gst_number = input.gst_number.or(existing.gst_number);
        if let Some(g) = gst_number.as_deref().filter(|g| !g.trim().is_empty()) {
            validate_gst_number(g).map_err(|msg| AppError::validation("gst_number", msg))?;
        }

        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers
             SET name = $1, phone = $2, address = $3, gst_number = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&name)
        .bind(&phone)
        .bind(input.address.or(existing.address))
        .bind(&gst_number)
        .bind(customer_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }

    /// Delete a customer
    pub async fn delete_customer(&self, customer_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        Ok(())
    }

    /// Collect dues from a customer
    ///
    /// The payment may not exceed the outstanding dues. The dues decrement
    /// and the cashbook receipt land in one transaction; the guard on
    /// `pending_dues` makes concurrent collections against the same customer
    /// serialize instead of overdrawing the balance.
    pub async fn receive_payment(
        &self,
        customer_id: Uuid,
        input: ReceivePaymentInput,
    ) -> AppResult<Customer> {
        validate_positive_amount(input.amount)
            .map_err(|msg| AppError::validation("amount", msg))?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers
             SET pending_dues = pending_dues - $2, updated_at = NOW()
             WHERE id = $1 AND pending_dues >= $2
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(input.amount)
        .fetch_optional(&mut *tx)
        .await?;

        let customer = match row {
            Some(row) => row.into_model(),
            None => {
                let dues = sqlx::query_scalar::<_, Decimal>(
                    "SELECT pending_dues FROM customers WHERE id = $1",
                )
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;

                return match dues {
                    Some(dues) => Err(AppError::validation(
                        "amount",
                        &format!("Payment of {} exceeds pending dues of {}", input.amount, dues),
                    )),
                    None => Err(AppError::NotFound("Customer".to_string())),
                };
            }
        };

        let description = match input.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(notes) => format!("{} - {}", customer.name, notes.trim()),
            None => customer.name.clone(),
        };
        CashbookService::insert_entry_on(
            &mut tx,
            Utc::now().date_naive(),
            EntryType::Receipt,
            "Payment Received",
            &description,
            input.amount,
            Some(input.payment_mode),
        )
        .await?;

        tx.commit().await?;

        Ok(customer)
    }
}
