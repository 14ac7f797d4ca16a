//! Customer HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::customer::{
    CreateCustomerInput, CustomerService, ReceivePaymentInput, UpdateCustomerInput,
};
use crate::AppState;

/// List all customers
pub async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    let service = CustomerService::new(state.db.clone());

    match service.list_customers().await {
        Ok(customers) => {
            (StatusCode::OK, Json(serde_json::json!({ "customers": customers }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific customer
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CustomerService::new(state.db.clone());

    match service.get_customer(customer_id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> impl IntoResponse {
    let service = CustomerService::new(state.db.clone());

    match service.create_customer(input).await {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a customer's contact details
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(input): Json<UpdateCustomerInput>,
) -> impl IntoResponse {
    let service = CustomerService::new(state.db.clone());

    match service.update_customer(customer_id, input).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CustomerService::new(state.db.clone());

    match service.delete_customer(customer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Collect dues from a customer
pub async fn receive_payment(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(input): Json<ReceivePaymentInput>,
) -> impl IntoResponse {
    let service = CustomerService::new(state.db.clone());

    match service.receive_payment(customer_id, input).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => e.into_response(),
    }
}
