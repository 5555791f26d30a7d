//! Route definitions for `/admin`. Every handler requires `x-admin-token`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// PUT    /bitlings/{id}/status      -> update_status
/// POST   /collection/{user_id}      -> collect_for_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bitlings/{id}/status", put(admin::update_status))
        .route("/collection/{user_id}", post(admin::collect_for_user))
}
