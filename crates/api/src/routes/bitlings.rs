//! Route definitions for the `/bitlings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bitlings;
use crate::state::AppState;

/// Routes mounted at `/bitlings`.
///
/// ```text
/// POST   /                       -> submit
/// GET    /                       -> list         (?status=&sort=&page=&limit=)
/// GET    /leaderboard            -> leaderboard  (?timeframe=&limit=)
/// GET    /{id}                   -> get_by_id
/// POST   /{id}/generate-stats    -> generate_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bitlings::list).post(bitlings::submit))
        .route("/leaderboard", get(bitlings::leaderboard))
        .route("/{id}", get(bitlings::get_by_id))
        .route("/{id}/generate-stats", post(bitlings::generate_stats))
}
