//! Reporting HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::report::ReportService;
use crate::AppState;

/// Dashboard snapshot: today's money movements, dues, stock alerts and
/// work in progress
pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let service = ReportService::new(state.db.clone());

    match service.dashboard().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
