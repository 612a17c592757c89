use axum::routing::post;
use axum::Router;

use crate::handlers::estimation;
use crate::state::AppState;

/// Routes mounted at `/estimates`.
///
/// ```text
/// POST /   -> estimate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(estimation::estimate))
}
