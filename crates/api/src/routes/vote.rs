use axum::routing::post;
use axum::Router;

use crate::handlers::vote;
use crate::state::AppState;

/// ```text
/// POST   /vote    -> cast
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/vote", post(vote::cast))
}
