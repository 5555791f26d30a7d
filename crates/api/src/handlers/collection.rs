//! Handlers for the `/collection` resource.

use axum::extract::State;
use axum::Json;
use bitlings_core::collection::CollectionSummary;
use bitlings_db::models::collection::CollectionEntry;

use crate::error::AppResult;
use crate::middleware::identity::CollectorId;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/collection
///
/// Entries owned by the caller (`x-user-id`, else the default user),
/// highest level first.
pub async fn list(
    State(state): State<AppState>,
    CollectorId(user_id): CollectorId,
) -> AppResult<Json<DataResponse<Vec<CollectionEntry>>>> {
    let entries = state.store.get_collection(&user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/collection/stats
pub async fn stats(
    State(state): State<AppState>,
    CollectorId(user_id): CollectorId,
) -> AppResult<Json<DataResponse<CollectionSummary>>> {
    let summary = state
        .store
        .collection_stats(&user_id, state.rules.completion_total)
        .await?;
    Ok(Json(DataResponse { data: summary }))
}
