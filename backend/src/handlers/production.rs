//! Production batch HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::production::{ProductionService, RecordProductionInput, StartBatchInput};
use crate::AppState;

/// List all production batches
pub async fn list_batches(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.list_batches().await {
        Ok(batches) => {
            (StatusCode::OK, Json(serde_json::json!({ "batches": batches }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific batch
pub async fn get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.get_batch(batch_id).await {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Start a new batch
pub async fn start_batch(
    State(state): State<AppState>,
    Json(input): Json<StartBatchInput>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.start_batch(input).await {
        Ok(batch) => (StatusCode::CREATED, Json(batch)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record produced units against a batch
pub async fn record_production(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<RecordProductionInput>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.record_production(batch_id, input).await {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Pause a batch
pub async fn pause_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.pause_batch(batch_id).await {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Resume a batch
pub async fn resume_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.resume_batch(batch_id).await {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Complete a batch, crediting production to stock
pub async fn complete_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.complete_batch(batch_id).await {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(e) => e.into_response(),
    }
}
