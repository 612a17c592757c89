use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database or region table is unavailable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the Knowledge Base has been published.
    pub regions_loaded: bool,
}

/// GET / -- plain-text liveness banner.
async fn banner() -> &'static str {
    "Backend server is running!"
}

/// GET /health -- service, database and region table health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = carbontune_db::health_check(&state.pool).await.is_ok();
    let regions_loaded = state.knowledge.get().is_some();

    let status = if db_healthy && regions_loaded {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        regions_loaded,
    })
}

/// Mount liveness routes at the root (not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}
