//! Raw material HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::material::{
    CreateMaterialInput, MaterialService, RecordPurchaseInput, UpdateMaterialInput,
};
use crate::services::stock::{AdjustMaterialStockInput, StockService};
use crate::AppState;

/// List all raw materials
pub async fn list_materials(State(state): State<AppState>) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.list_materials().await {
        Ok(materials) => {
            (StatusCode::OK, Json(serde_json::json!({ "materials": materials }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// List materials at or below their reorder level
pub async fn low_stock_materials(State(state): State<AppState>) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.low_stock_materials().await {
        Ok(materials) => {
            (StatusCode::OK, Json(serde_json::json!({ "materials": materials }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific material
pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.get_material(material_id).await {
        Ok(material) => (StatusCode::OK, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a material
pub async fn create_material(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialInput>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.create_material(input).await {
        Ok(material) => (StatusCode::CREATED, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a material's catalog fields
pub async fn update_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.update_material(material_id, input).await {
        Ok(material) => (StatusCode::OK, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a material
pub async fn delete_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.delete_material(material_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a material purchase
pub async fn record_purchase(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<RecordPurchaseInput>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.record_purchase(material_id, input).await {
        Ok(material) => (StatusCode::OK, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Manually adjust a material's stock level
pub async fn adjust_material_stock(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<AdjustMaterialStockInput>,
) -> impl IntoResponse {
    let service = StockService::new(state.db.clone());

    match service.adjust_material_stock(material_id, input.delta).await {
        Ok(material) => (StatusCode::OK, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}
