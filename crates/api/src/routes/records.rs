//! Route definitions for the `/data` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/data`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list).post(records::create))
        .route(
            "/{id}",
            get(records::get_by_id)
                .put(records::update)
                .delete(records::delete),
        )
}
