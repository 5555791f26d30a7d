//! Handler for `POST /vote`.

use axum::extract::State;
use axum::Json;
use bitlings_core::types::DbId;
use bitlings_core::voting::VoteValue;
use bitlings_db::models::collection::CollectionEntry;
use bitlings_db::models::proposal::Proposal;
use bitlings_db::models::vote::Vote;
use serde::{Deserialize, Serialize};

use crate::engine::promotion;
use crate::error::AppResult;
use crate::middleware::extract::AppJson;
use crate::middleware::identity::VoterIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body: `{ "bitlingId": uuid, "vote": 1 | -1 }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub bitling_id: DbId,
    pub vote: VoteValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub message: &'static str,
    pub vote: Vote,
    /// The proposal with updated counters and status.
    pub bitling: Proposal,
    /// Whether this vote promoted the proposal to `accepted`.
    pub promoted: bool,
    pub collected: Option<CollectionEntry>,
}

/// POST /api/v1/vote
///
/// One vote per voter and proposal. Repeating the same direction returns
/// `400 DUPLICATE_VOTE`; the opposite direction flips the existing vote.
pub async fn cast(
    State(state): State<AppState>,
    VoterIdentity(voter): VoterIdentity,
    AppJson(body): AppJson<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteResponse>>> {
    let result = promotion::cast_vote(&state, body.bitling_id, voter, body.vote).await?;
    let outcome = result.outcome;

    let message = if outcome.change.is_flip() {
        "Vote updated successfully"
    } else {
        "Vote recorded successfully"
    };

    Ok(Json(DataResponse {
        data: VoteResponse {
            message,
            vote: outcome.vote,
            bitling: outcome.proposal,
            promoted: outcome.transition.fired(),
            collected: result.collected,
        },
    }))
}
