//! Handlers for the `/bitlings` resource: submission, listing, leaderboard,
//! lookup, and stats generation for a stored proposal.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bitlings_core::creature::{coerce_types, CreatureType};
use bitlings_core::generation::{normalize_moves, normalize_stats, GeneratedBundle};
use bitlings_core::listing::{leaderboard_limit, PageRequest};
use bitlings_core::types::DbId;
use bitlings_db::models::proposal::{CreateProposal, Proposal, ProposalFilter, ProposalWithStats};
use bitlings_db::models::stat_block::NewStatBlock;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::generation::generate_for_proposal;
use crate::error::AppResult;
use crate::middleware::extract::{AppJson, AppPath, AppQuery};
use crate::query::{LeaderboardParams, ListBitlingsParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /bitlings`.
///
/// `stats` and `moves` arrive as loose JSON and go through the same repair
/// rules as generator output. `description` and `behavior` are accepted for
/// compatibility with the generator bundle shape but not stored.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBitlingRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "name must be 1-64 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "prompt must be 1-2000 characters"))]
    pub prompt: String,
    #[validate(length(max = 64, message = "creatorHandle must be at most 64 characters"))]
    pub creator_handle: Option<String>,
    pub image_url: Option<String>,
    pub types: Option<Vec<String>>,
    pub stats: Option<serde_json::Value>,
    pub moves: Option<serde_json::Value>,
    pub description: Option<String>,
    pub behavior: Option<String>,
}

impl SubmitBitlingRequest {
    /// Convert into the store DTO. Types default to `[normal]`; a stat block
    /// is attached only when both `stats` and `moves` are present.
    pub fn into_create(self) -> CreateProposal {
        let types = match self.types.as_deref() {
            Some(raw) => coerce_types(raw),
            None => vec![CreatureType::Normal],
        };

        let stat_block = match (&self.stats, &self.moves) {
            (Some(stats), Some(moves)) => {
                let mut repairs = Vec::new();
                let block = NewStatBlock {
                    stats: normalize_stats(stats, &mut repairs),
                    moves: normalize_moves(moves, &mut repairs),
                };
                if !repairs.is_empty() {
                    tracing::debug!(name = %self.name, ?repairs, "Repaired submitted stat block");
                }
                Some(block)
            }
            _ => None,
        };

        CreateProposal {
            name: self.name.trim().to_string(),
            prompt: self.prompt.trim().to_string(),
            image_url: self.image_url,
            creator_handle: self
                .creator_handle
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            types: Some(types),
            stat_block,
        }
    }
}

/// Response body for `POST /bitlings/{id}/generate-stats`.
#[derive(Debug, Serialize)]
pub struct GeneratedStatsResponse {
    pub message: &'static str,
    pub stats: GeneratedBundle,
}

/// POST /api/v1/bitlings
///
/// Submit a new proposal. Returns 201 with the stored proposal, merged with
/// its stat block when one was supplied.
pub async fn submit(
    State(state): State<AppState>,
    AppJson(body): AppJson<SubmitBitlingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProposalWithStats>>)> {
    body.validate()?;
    let created = state.store.create_proposal(body.into_create()).await?;

    tracing::info!(
        proposal_id = %created.proposal.id,
        name = %created.proposal.name,
        with_stats = created.stats.is_some(),
        "Proposal submitted",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/bitlings?status=&sort=&page=&limit=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListBitlingsParams>,
) -> AppResult<Json<DataResponse<Vec<Proposal>>>> {
    let filter = ProposalFilter {
        status: params.status_filter()?,
        sort: params.sort,
    };
    let page = PageRequest::new(params.page, params.limit)?;
    let proposals = state.store.list_proposals(filter, page).await?;
    Ok(Json(DataResponse { data: proposals }))
}

/// GET /api/v1/bitlings/leaderboard?timeframe=&limit=
pub async fn leaderboard(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LeaderboardParams>,
) -> AppResult<Json<DataResponse<Vec<Proposal>>>> {
    let limit = leaderboard_limit(params.limit)?;
    let proposals = state
        .store
        .leaderboard(params.timeframe, limit, Utc::now())
        .await?;
    Ok(Json(DataResponse { data: proposals }))
}

/// GET /api/v1/bitlings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProposalWithStats>>> {
    let proposal = state.store.get_proposal(id).await?;
    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/bitlings/{id}/generate-stats
///
/// Generate, repair, and persist stats for a proposal that has none.
/// Returns 409 when the proposal already has a stat block.
pub async fn generate_stats(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<GeneratedStatsResponse>>> {
    let bundle = generate_for_proposal(&state, id).await?;
    Ok(Json(DataResponse {
        data: GeneratedStatsResponse {
            message: "Stats generated successfully",
            stats: bundle,
        },
    }))
}
