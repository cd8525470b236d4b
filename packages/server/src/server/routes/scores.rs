use std::collections::HashMap;

use axum::extract::{Extension, Query};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use super::ApiError;
use crate::kernel::StoredScore;
use crate::server::app::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ScoresParams {
    /// Comma-separated project ids
    #[serde(default)]
    pub ids: String,
}

impl ScoresParams {
    pub fn project_ids(&self) -> Vec<String> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `GET /scores?ids=a,b` - stored scores keyed by project id.
pub async fn stored_scores_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ScoresParams>,
) -> Result<Json<HashMap<String, StoredScore>>, ApiError> {
    let ids = params.project_ids();

    state.deps.score_store.get(&ids).await.map(Json).map_err(|e| {
        error!(error = %e, "Score lookup failed");
        ApiError::internal(format!("{e:#}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ids() {
        let params = ScoresParams {
            ids: " P1,,P2 , ".into(),
        };
        assert_eq!(params.project_ids(), vec!["P1", "P2"]);
        assert!(ScoresParams::default().project_ids().is_empty());
    }
}
