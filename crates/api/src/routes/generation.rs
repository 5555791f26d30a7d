//! Route definitions for the stateless generation endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// ```text
/// POST   /generate-image    -> generate_image
/// POST   /generate-stats    -> preview_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-image", post(generation::generate_image))
        .route("/generate-stats", post(generation::preview_stats))
}
