use crate::state::AppState;
use axum::{extract::State, Json};
use coachtrust_core::StorageBackend;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub storage: StorageBackend,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        storage: state.storage.backend_type(),
    })
}
