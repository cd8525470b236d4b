use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use super::ApiError;
use crate::domains::projects::{ProjectPage, ProjectQuery, ProjectSearchParams};
use crate::server::app::AppState;

/// `GET /projects` - one page of upstream projects.
pub async fn search_projects_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ProjectSearchParams>,
) -> Result<Json<ProjectPage>, ApiError> {
    let query = ProjectQuery::from(params);

    state
        .deps
        .project_source
        .search(&query)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "Project search failed");
            ApiError::new(StatusCode::BAD_GATEWAY, format!("{e:#}"))
        })
}
