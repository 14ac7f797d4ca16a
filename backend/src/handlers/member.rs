//! Payroll member HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::member::{CreateMemberInput, MemberService, UpdateMemberInput};
use crate::AppState;

/// List the payroll roster
pub async fn list_members(State(state): State<AppState>) -> impl IntoResponse {
    let service = MemberService::new(state.db.clone());

    match service.list_members().await {
        Ok(members) => {
            (StatusCode::OK, Json(serde_json::json!({ "members": members }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific member
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MemberService::new(state.db.clone());

    match service.get_member(member_id).await {
        Ok(member) => (StatusCode::OK, Json(member)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add a member to the roster
pub async fn create_member(
    State(state): State<AppState>,
    Json(input): Json<CreateMemberInput>,
) -> impl IntoResponse {
    let service = MemberService::new(state.db.clone());

    match service.create_member(input).await {
        Ok(member) => (StatusCode::CREATED, Json(member)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a member
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    Json(input): Json<UpdateMemberInput>,
) -> impl IntoResponse {
    let service = MemberService::new(state.db.clone());

    match service.update_member(member_id, input).await {
        Ok(member) => (StatusCode::OK, Json(member)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Remove a member
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MemberService::new(state.db.clone());

    match service.delete_member(member_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
