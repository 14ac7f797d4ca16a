//! Sales and invoicing HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::sales::{CreateSaleInput, SalesService};
use crate::AppState;
use shared::DeliveryStatus;

/// List all invoices
pub async fn list_invoices(State(state): State<AppState>) -> impl IntoResponse {
    let service = SalesService::new(state.db.clone());

    match service.list_invoices().await {
        Ok(invoices) => {
            (StatusCode::OK, Json(serde_json::json!({ "invoices": invoices }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific invoice with its items
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SalesService::new(state.db.clone());

    match service.get_invoice(invoice_id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a sale
pub async fn create_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateSaleInput>,
) -> impl IntoResponse {
    let service = SalesService::new(state.db.clone());

    match service.create_sale(input).await {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Input for updating an invoice's delivery status
#[derive(Debug, Deserialize)]
pub struct UpdateDeliveryInput {
    pub delivery_status: DeliveryStatus,
}

/// Update an invoice's delivery status
pub async fn update_delivery_status(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
    Json(input): Json<UpdateDeliveryInput>,
) -> impl IntoResponse {
    let service = SalesService::new(state.db.clone());

    match service
        .update_delivery_status(invoice_id, input.delivery_status)
        .await
    {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}
