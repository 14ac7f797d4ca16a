//! Cashbook HTTP handlers

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::services::cashbook::{CashbookService, CreateEntryInput, EntryFilter};
use crate::AppState;

/// List cashbook entries, optionally filtered by date range and type
pub async fn list_entries(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> impl IntoResponse {
    let service = CashbookService::new(state.db.clone());

    match service.list_entries(filter).await {
        Ok(entries) => {
            (StatusCode::OK, Json(serde_json::json!({ "entries": entries }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Append a manual cashbook entry
pub async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<CreateEntryInput>,
) -> impl IntoResponse {
    let service = CashbookService::new(state.db.clone());

    match service.create_entry(input).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Receipts against payments over an optional date range
pub async fn summary(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> impl IntoResponse {
    let service = CashbookService::new(state.db.clone());

    match service.summary(filter).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Export the ledger as CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> impl IntoResponse {
    let service = CashbookService::new(state.db.clone());

    match service.export_csv(filter).await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"cashbook.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
