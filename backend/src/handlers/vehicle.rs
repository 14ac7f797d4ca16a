//! Vehicle fleet HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::vehicle::{CreateVehicleInput, DispatchInput, VehicleService};
use crate::AppState;

/// List the fleet
pub async fn list_vehicles(State(state): State<AppState>) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.list_vehicles().await {
        Ok(vehicles) => {
            (StatusCode::OK, Json(serde_json::json!({ "vehicles": vehicles }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific vehicle
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.get_vehicle(vehicle_id).await {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Register a vehicle
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(input): Json<CreateVehicleInput>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.create_vehicle(input).await {
        Ok(vehicle) => (StatusCode::CREATED, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Remove a vehicle
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.delete_vehicle(vehicle_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Dispatch a vehicle against an invoice
pub async fn dispatch_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(input): Json<DispatchInput>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.dispatch(vehicle_id, input).await {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Release a vehicle back from a delivery
pub async fn release_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.release(vehicle_id).await {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Send a vehicle to maintenance
pub async fn start_maintenance(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.start_maintenance(vehicle_id).await {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Return a vehicle from maintenance
pub async fn end_maintenance(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VehicleService::new(state.db.clone());

    match service.end_maintenance(vehicle_id).await {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(e) => e.into_response(),
    }
}
