//! Route definitions for the `/collection` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::collection;
use crate::state::AppState;

/// Routes mounted at `/collection`. The owner comes from `x-user-id`.
///
/// ```text
/// GET    /         -> list
/// GET    /stats    -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(collection::list))
        .route("/stats", get(collection::stats))
}
