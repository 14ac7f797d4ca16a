//! Sales service: the multi-entity invoice creation workflow
//!
//! Creating a sale touches the customer, the sequence counter, the invoice
//! and its items, the cashbook and block stock. All of it runs inside one
//! database transaction: stock is validated before anything is written, and
//! a failure at any step rolls back every earlier step, so the ledger can
//! never hold an invoice whose stock or cash movements went missing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::cashbook::CashbookService;
use crate::services::customer::{CreateCustomerInput, CustomerService};
use crate::services::sequence::SequenceService;
use crate::services::stock::StockService;
use shared::{
    line_amount, total_with_transport, validate_non_negative_amount, validate_positive_quantity,
    DeliveryStatus, EntryType, Invoice, InvoiceItem, PaymentMode, PaymentStatus,
};

/// Sales service
#[derive(Clone)]
pub struct SalesService {
    db: PgPool,
}

/// Database row for an invoice
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    invoice_number: String,
    customer_id: Option<Uuid>,
    subtotal: Decimal,
    transport_cost: Decimal,
    total_amount: Decimal,
    amount_paid: Decimal,
    payment_status: String,
    payment_mode: Option<String>,
    vehicle_id: Option<Uuid>,
    delivery_address: Option<String>,
    delivery_status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_model(self, items: Vec<InvoiceItem>) -> AppResult<Invoice> {
        let payment_status = PaymentStatus::parse(&self.payment_status).ok_or_else(|| {
            AppError::Internal(format!("unknown payment status: {}", self.payment_status))
        })?;
        let delivery_status = DeliveryStatus::parse(&self.delivery_status).ok_or_else(|| {
            AppError::Internal(format!("unknown delivery status: {}", self.delivery_status))
        })?;
        let payment_mode = match self.payment_mode.as_deref() {
            Some(m) => Some(
                PaymentMode::parse(m)
                    .ok_or_else(|| AppError::Internal(format!("unknown payment mode: {m}")))?,
            ),
            None => None,
        };
        Ok(Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            customer_id: self.customer_id,
            subtotal: self.subtotal,
            transport_cost: self.transport_cost,
            total_amount: self.total_amount,
            amount_paid: self.amount_paid,
            payment_status,
            payment_mode,
            vehicle_id: self.vehicle_id,
            delivery_address: self.delivery_address,
            delivery_status,
            notes: self.notes,
            created_at: self.created_at,
            items,
        })
    }
}

/// Database row for an invoice item
#[derive(Debug, sqlx::FromRow)]
struct InvoiceItemRow {
    id: Uuid,
    invoice_id: Uuid,
    block_id: Option<Uuid>,
    block_name: String,
    quantity: i64,
    rate: Decimal,
    amount: Decimal,
    created_at: DateTime<Utc>,
}

impl From<InvoiceItemRow> for InvoiceItem {
    fn from(row: InvoiceItemRow) -> Self {
        InvoiceItem {
            id: row.id,
            invoice_id: row.invoice_id,
            block_id: row.block_id,
            block_name: row.block_name,
            quantity: row.quantity,
            rate: row.rate,
            amount: row.amount,
            created_at: row.created_at,
        }
    }
}

/// One line of a sale request
#[derive(Debug, Deserialize)]
pub struct SaleItemInput {
    pub block_id: Uuid,
    pub quantity: i64,
    /// Defaults to the block's catalog price when absent
    pub rate: Option<Decimal>,
}

/// Input for creating a sale
#[derive(Debug, Deserialize)]
pub struct CreateSaleInput {
    /// Existing customer, or absent to create/skip one
    pub customer_id: Option<Uuid>,
    /// New customer to create as part of the sale
    pub new_customer: Option<CreateCustomerInput>,
    /// Walk-in sale: no customer record at all
    #[serde(default)]
    pub walk_in: bool,
    pub items: Vec<SaleItemInput>,
    #[serde(default)]
    pub transport_cost: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    pub payment_mode: Option<PaymentMode>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

const INVOICE_COLUMNS: &str = "id, invoice_number, customer_id, subtotal, transport_cost, \
                               total_amount, amount_paid, payment_status, payment_mode, \
                               vehicle_id, delivery_address, delivery_status, notes, created_at";

const ITEM_COLUMNS: &str =
    "id, invoice_id, block_id, block_name, quantity, rate, amount, created_at";

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a sale: resolve the customer, allocate an invoice number,
    /// persist the invoice and items, update customer aggregates, record the
    /// cashbook receipt and decrement block stock, atomically
    pub async fn create_sale(&self, input: CreateSaleInput) -> AppResult<Invoice> {
        // Reject malformed input before touching the store
        if input.items.is_empty() {
            return Err(AppError::validation("items", "At least one item is required"));
        }
        for item in &input.items {
            validate_positive_quantity(item.quantity)
                .map_err(|msg| AppError::validation("items", msg))?;
            if let Some(rate) = item.rate {
                validate_non_negative_amount(rate)
                    .map_err(|msg| AppError::validation("items", msg))?;
            }
        }
        validate_non_negative_amount(input.transport_cost)
            .map_err(|msg| AppError::validation("transport_cost", msg))?;
        validate_non_negative_amount(input.amount_paid)
            .map_err(|msg| AppError::validation("amount_paid", msg))?;
        if input.customer_id.is_none() && input.new_customer.is_none() && !input.walk_in {
            return Err(AppError::validation(
                "customer_id",
                "Select a customer, supply a new one, or mark the sale walk-in",
            ));
        }

        let mut tx = self.db.begin().await?;

        // Load every referenced block and check stock for the whole sale up
        // front; the guarded decrements below re-enforce this, but failing
        // early keeps rejections cheap and the error specific
        let mut qty_by_block: HashMap<Uuid, i64> = HashMap::new();
        for item in &input.items {
            *qty_by_block.entry(item.block_id).or_insert(0) += item.quantity;
        }
        // Lock block rows in one global order (by id) so two sales touching
        // the same blocks can never deadlock on each other
        let mut block_demand: Vec<(Uuid, i64)> = qty_by_block.into_iter().collect();
        block_demand.sort_by_key(|(id, _)| *id);

        let mut blocks: HashMap<Uuid, (String, Decimal)> = HashMap::new();
        for &(block_id, wanted) in &block_demand {
            let row = sqlx::query_as::<_, (String, i64, Decimal)>(
                "SELECT name, available_qty, price_per_unit FROM blocks WHERE id = $1",
            )
            .bind(block_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Block".to_string()))?;

            let (name, available, price) = row;
            if available < wanted {
                return Err(AppError::InsufficientStock(format!(
                    "{} has {} units available, sale needs {}",
                    name, available, wanted
                )));
            }
            blocks.insert(block_id, (name, price));
        }

        // Resolve the customer
        let customer: Option<(Uuid, String)> = if let Some(customer_id) = input.customer_id {
            let name =
                sqlx::query_scalar::<_, String>("SELECT name FROM customers WHERE id = $1")
                    .bind(customer_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;
            Some((customer_id, name))
        } else if let Some(new_customer) = input.new_customer.clone() {
            let created = CustomerService::insert_customer_on(&mut tx, new_customer).await?;
            Some((created.id, created.name))
        } else {
            None
        };

        // Allocate the invoice number inside the transaction
        let invoice_number = SequenceService::next_invoice_number_on(&mut tx).await?;

        // Compute line amounts and totals
        let mut lines: Vec<(Uuid, String, i64, Decimal, Decimal)> = Vec::new();
        let mut subtotal = Decimal::ZERO;
        for item in &input.items {
            let (name, price) = blocks
                .get(&item.block_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Block".to_string()))?;
            let rate = item.rate.unwrap_or(price);
            let amount = line_amount(item.quantity, rate);
            subtotal += amount;
            lines.push((item.block_id, name, item.quantity, rate, amount));
        }
        let total_amount = total_with_transport(subtotal, input.transport_cost);
        let payment_status = PaymentStatus::derive(input.amount_paid, total_amount);
        let payment_mode = if input.amount_paid > Decimal::ZERO {
            input.payment_mode
        } else {
            None
        };

        // Persist the invoice
        let invoice_row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "INSERT INTO invoices
                 (invoice_number, customer_id, subtotal, transport_cost, total_amount,
                  amount_paid, payment_status, payment_mode, delivery_address, delivery_status,
                  notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending', $10)
             RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(&invoice_number)
        .bind(customer.as_ref().map(|(id, _)| *id))
        .bind(subtotal)
        .bind(input.transport_cost)
        .bind(total_amount)
        .bind(input.amount_paid)
        .bind(payment_status.as_str())
        .bind(payment_mode.map(|m| m.as_str()))
        .bind(&input.delivery_address)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        // Persist line items with their block-name snapshot
        let mut items = Vec::with_capacity(lines.len());
        for (block_id, block_name, quantity, rate, amount) in &lines {
            let item_row = sqlx::query_as::<_, InvoiceItemRow>(&format!(
                "INSERT INTO invoice_items (invoice_id, block_id, block_name, quantity, rate, amount)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING {ITEM_COLUMNS}"
            ))
            .bind(invoice_row.id)
            .bind(block_id)
            .bind(block_name)
            .bind(quantity)
            .bind(rate)
            .bind(amount)
            .fetch_one(&mut *tx)
            .await?;
            items.push(InvoiceItem::from(item_row));
        }

        // Update customer aggregates with a single atomic increment. An
        // overpayment never pushes dues below zero.
        if let Some((customer_id, _)) = &customer {
            let dues_delta = (total_amount - input.amount_paid).max(Decimal::ZERO);
            sqlx::query(
                "UPDATE customers
                 SET total_business = total_business + $2,
                     pending_dues = pending_dues + $3,
                     updated_at = NOW()
                 WHERE id = $1",
            )
            .bind(customer_id)
            .bind(total_amount)
            .bind(dues_delta)
            .execute(&mut *tx)
            .await?;
        }

        // Record the receipt for whatever was paid now
        if input.amount_paid > Decimal::ZERO {
            let payer = customer
                .as_ref()
                .map(|(_, name)| name.as_str())
                .unwrap_or("Walk-in");
            CashbookService::insert_entry_on(
                &mut tx,
                Utc::now().date_naive(),
                EntryType::Receipt,
                "Sales",
                &format!("{invoice_number} - {payer}"),
                input.amount_paid,
                payment_mode,
            )
            .await?;
        }

        // Decrement stock per block through the guard, in the same id order
        // as the precheck above
        for &(block_id, wanted) in &block_demand {
            StockService::adjust_block_stock_on(&mut tx, block_id, -wanted).await?;
        }

        tx.commit().await?;

        tracing::info!("Created invoice {}", invoice_number);
        invoice_row.into_model(items)
    }

    /// Get an invoice with its items
    pub async fn get_invoice(&self, invoice_id: Uuid) -> AppResult<Invoice> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(invoice_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;

        let items = sqlx::query_as::<_, InvoiceItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = $1 ORDER BY created_at"
        ))
        .bind(invoice_id)
        .fetch_all(&self.db)
        .await?;

        row.into_model(items.into_iter().map(InvoiceItem::from).collect())
    }

    /// List invoices with their items, newest first
    pub async fn list_invoices(&self) -> AppResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        let item_rows = sqlx::query_as::<_, InvoiceItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;

        let mut items_by_invoice: HashMap<Uuid, Vec<InvoiceItem>> = HashMap::new();
        for item in item_rows {
            items_by_invoice
                .entry(item.invoice_id)
                .or_default()
                .push(InvoiceItem::from(item));
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_invoice.remove(&row.id).unwrap_or_default();
                row.into_model(items)
            })
            .collect()
    }

    /// Move an invoice's delivery status
    pub async fn update_delivery_status(
        &self,
        invoice_id: Uuid,
        status: DeliveryStatus,
    ) -> AppResult<Invoice> {
        let updated = sqlx::query(
            "UPDATE invoices SET delivery_status = $2 WHERE id = $1",
        )
        .bind(invoice_id)
        .bind(status.as_str())
        .execute(&self.db)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Invoice".to_string()));
        }

        self.get_invoice(invoice_id).await
    }

    /// Set or clear the vehicle attached to an invoice; used by dispatch
    pub(crate) async fn set_vehicle_on(
        conn: &mut PgConnection,
        invoice_id: Uuid,
        vehicle_id: Option<Uuid>,
        delivery_status: DeliveryStatus,
    ) -> AppResult<()> {
        let updated = sqlx::query(
            "UPDATE invoices SET vehicle_id = $2, delivery_status = $3 WHERE id = $1",
        )
        .bind(invoice_id)
        .bind(vehicle_id)
        .bind(delivery_status.as_str())
        .execute(&mut *conn)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Invoice".to_string()));
        }

        Ok(())
    }
}
