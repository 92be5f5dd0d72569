use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tickethealth_core::{Config, StorageStatus};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Config> {
    Json(state.config().clone())
}

pub async fn storage_status(State(state): State<Arc<AppState>>) -> Json<StorageStatus> {
    Json(state.repo().storage_status())
}
