pub mod admin;
pub mod bitlings;
pub mod collection;
pub mod generation;
pub mod health;
pub mod vote;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /bitlings                                 submit (POST), list (GET)
/// /bitlings/leaderboard                     leaderboard (GET)
/// /bitlings/{id}                            get (GET)
/// /bitlings/{id}/generate-stats             generate and persist stats (POST)
///
/// /vote                                     cast vote (POST)
///
/// /collection                               caller's collection (GET)
/// /collection/stats                         collection summary (GET)
///
/// /generate-image                           generate image URL (POST)
/// /generate-stats                           stats preview, not stored (POST)
///
/// /admin/bitlings/{id}/status               set status (PUT, admin token)
/// /admin/collection/{user_id}               grant creature (POST, admin token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/bitlings", bitlings::router())
        .merge(vote::router())
        .nest("/collection", collection::router())
        .merge(generation::router())
        .nest("/admin", admin::router())
}
