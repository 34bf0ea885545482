use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Runtime configuration served to the browser bundle; the frontend
/// fetches this before its first API call.
#[derive(Debug, Serialize)]
pub struct RuntimeConfig {
    pub api_base_url: String,
}

pub async fn runtime_config(State(state): State<AppState>) -> Json<RuntimeConfig> {
    Json(RuntimeConfig {
        api_base_url: state.config.public_api_base_url.clone(),
    })
}
