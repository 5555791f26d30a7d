//! Administrative handlers, guarded by [`RequireAdmin`].
//!
//! These cover the lifecycle steps no player action triggers: opening a
//! proposal for voting and granting a creature to a collection directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bitlings_core::creature::ProposalStatus;
use bitlings_core::error::CoreError;
use bitlings_core::types::DbId;
use bitlings_db::models::collection::CollectionEntry;
use bitlings_db::models::proposal::Proposal;
use serde::{Deserialize, Serialize};

use crate::engine::promotion;
use crate::error::AppResult;
use crate::middleware::admin::RequireAdmin;
use crate::middleware::extract::{AppJson, AppPath};
use crate::middleware::identity::MAX_USER_ID_LEN;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
    pub bitling: Proposal,
    pub previous_status: ProposalStatus,
    /// Set when the change made the creature canonical and it was added to
    /// the default user's collection.
    pub collected: Option<CollectionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRequest {
    pub bitling_id: DbId,
}

/// PUT /api/v1/admin/bitlings/{id}/status
///
/// Set a proposal's status. Moving into `accepted` or `inGame` runs the
/// same collection side effect as a vote-driven promotion.
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<UpdateStatusResponse>>> {
    let status: ProposalStatus = body.status.trim().parse()?;
    let update = state.store.set_status(id, status).await?;

    tracing::info!(
        proposal_id = %id,
        from = %update.previous,
        to = %update.proposal.status,
        "Status changed by admin",
    );

    let mut collected = None;
    if update.became_canonical() {
        match promotion::collect(&state, &state.config.default_user_id, id).await {
            Ok(entry) => collected = Some(entry),
            Err(CoreError::Conflict(msg)) => {
                tracing::warn!(proposal_id = %id, reason = %msg, "Skipped collection on status change");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Json(DataResponse {
        data: UpdateStatusResponse {
            bitling: update.proposal,
            previous_status: update.previous,
            collected,
        },
    }))
}

/// POST /api/v1/admin/collection/{user_id}
///
/// Add an accepted creature to `user_id`'s collection. Returns 409 when the
/// creature is not canonical or the user already owns it.
pub async fn collect_for_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<String>,
    AppJson(body): AppJson<CollectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CollectionEntry>>)> {
    let user_id = user_id.trim();
    if user_id.is_empty() || user_id.len() > MAX_USER_ID_LEN {
        return Err(CoreError::Validation(format!(
            "user id must be 1-{MAX_USER_ID_LEN} characters"
        ))
        .into());
    }

    let entry = promotion::collect(&state, user_id, body.bitling_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}
