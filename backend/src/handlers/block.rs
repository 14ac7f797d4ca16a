//! Block catalog HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::block::{BlockService, CreateBlockInput, UpdateBlockInput};
use crate::services::stock::{AdjustBlockStockInput, StockService};
use crate::AppState;

/// List all blocks
pub async fn list_blocks(State(state): State<AppState>) -> impl IntoResponse {
    let service = BlockService::new(state.db.clone());

    match service.list_blocks().await {
        Ok(blocks) => (StatusCode::OK, Json(serde_json::json!({ "blocks": blocks }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific block
pub async fn get_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = BlockService::new(state.db.clone());

    match service.get_block(block_id).await {
        Ok(block) => (StatusCode::OK, Json(block)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a block
pub async fn create_block(
    State(state): State<AppState>,
    Json(input): Json<CreateBlockInput>,
) -> impl IntoResponse {
    let service = BlockService::new(state.db.clone());

    match service.create_block(input).await {
        Ok(block) => (StatusCode::CREATED, Json(block)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a block's catalog fields
pub async fn update_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
    Json(input): Json<UpdateBlockInput>,
) -> impl IntoResponse {
    let service = BlockService::new(state.db.clone());

    match service.update_block(block_id, input).await {
        Ok(block) => (StatusCode::OK, Json(block)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a block
pub async fn delete_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = BlockService::new(state.db.clone());

    match service.delete_block(block_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Manually adjust a block's stock level
pub async fn adjust_block_stock(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
    Json(input): Json<AdjustBlockStockInput>,
) -> impl IntoResponse {
    let service = StockService::new(state.db.clone());

    match service.adjust_block_stock(block_id, input.delta).await {
        Ok(block) => (StatusCode::OK, Json(block)).into_response(),
        Err(e) => e.into_response(),
    }
}
