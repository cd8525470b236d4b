use axum::extract::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domains::scoring::{score_batch, ScoringRequest, ScoringResult};
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct ScoreProjectsResponse {
    pub results: Vec<ScoringResult>,
}

/// `POST /score-projects`
///
/// Per-project failures are reported inside `results`; only a rejected
/// configuration fails the request.
pub async fn score_projects_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ScoringRequest>,
) -> Result<Json<ScoreProjectsResponse>, ApiError> {
    let cancel = state.shutdown.child_token();
    let results = score_batch(request, &state.deps, &cancel).await?;
    Ok(Json(ScoreProjectsResponse { results }))
}
