pub mod catalog;
pub mod estimation;
pub mod health;
pub mod records;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /data                                    list, create
/// /data/{id}                               get, update, delete
///
/// /catalog/models                          model catalog
/// /catalog/tasks                           task catalog
/// /catalog/gpus                            GPU catalog
///
/// /measurements                            measurement slice (?model=&task=&gpu=)
/// /regions                                 region names (503 while loading)
///
/// /estimates                               estimate a fine-tuning run (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/data", records::router())
        .nest("/catalog", catalog::router())
        .route("/measurements", get(handlers::catalog::select_measurements))
        .route("/regions", get(handlers::catalog::list_regions))
        .nest("/estimates", estimation::router())
}
