//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::routes::{
    generate_report_handler, health_handler, score_projects_handler, search_projects_handler,
    stored_scores_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Cancelled on shutdown; batches stop starting new projects
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(deps: ServerDeps, shutdown: CancellationToken) -> Self {
        Self {
            deps: Arc::new(deps),
            shutdown,
        }
    }
}

/// Build the router over already-wired state.
pub fn build_router(app_state: AppState) -> Router {
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/projects", get(search_projects_handler))
        .route("/score-projects", post(score_projects_handler))
        .route("/generate-report", post(generate_report_handler))
        .route("/scores", get(stored_scores_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the Axum application from configuration.
pub fn build_app(
    config: &Config,
    pool: Option<PgPool>,
    shutdown: CancellationToken,
) -> Result<Router> {
    let deps = ServerDeps::from_config(config, pool)?;
    Ok(build_router(AppState::new(deps, shutdown)))
}
