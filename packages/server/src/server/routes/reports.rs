use axum::extract::Extension;
use axum::Json;

use crate::domains::reports::{generate_report, ReportRequest, ReportResponse};
use crate::server::app::AppState;

/// `POST /generate-report`
pub async fn generate_report_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ReportRequest>,
) -> Json<ReportResponse> {
    Json(generate_report(request, &state.deps).await)
}
