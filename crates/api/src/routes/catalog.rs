use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET /models   -> list_models
/// GET /tasks    -> list_tasks
/// GET /gpus     -> list_gpus
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(catalog::list_models))
        .route("/tasks", get(catalog::list_tasks))
        .route("/gpus", get(catalog::list_gpus))
}
