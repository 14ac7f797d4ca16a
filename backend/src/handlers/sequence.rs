//! Document sequence HTTP handlers
//!
//! Allocation endpoints, mainly for tooling and manual paperwork: each call
//! consumes a number.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::sequence::SequenceService;
use crate::AppState;

/// Allocate the next invoice number
pub async fn next_invoice_number(State(state): State<AppState>) -> impl IntoResponse {
    let service = SequenceService::new(state.db.clone());

    match service.next_invoice_number().await {
        Ok(number) => {
            (StatusCode::OK, Json(serde_json::json!({ "invoice_number": number }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Allocate the next batch number
pub async fn next_batch_number(State(state): State<AppState>) -> impl IntoResponse {
    let service = SequenceService::new(state.db.clone());

    match service.next_batch_number().await {
        Ok(number) => {
            (StatusCode::OK, Json(serde_json::json!({ "batch_number": number }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
