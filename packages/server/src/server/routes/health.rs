use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    search_backends: Vec<&'static str>,
    scoring_concurrency: usize,
}

/// Health check endpoint
///
/// Reports the configured search chain and scoring concurrency.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        search_backends: state.deps.research.chain().backend_names(),
        scoring_concurrency: state.deps.scoring_concurrency,
    })
}
