//! Voting and the one-time side effects of promotion.
//!
//! The store decides atomically whether a vote crossed the threshold and
//! reports it as a [`Transition`]. This module reacts to that edge exactly
//! once: it makes sure the creature has a stat block and materialises it
//! into the default user's collection.

use bitlings_core::collection::roll_capture;
use bitlings_core::creature::CreatureType;
use bitlings_core::error::CoreError;
use bitlings_core::procedural::{moves_for_type, roll_stats};
use bitlings_core::types::DbId;
use bitlings_core::voting::{Transition, VoteValue};
use bitlings_db::models::collection::CollectionEntry;
use bitlings_db::models::proposal::ProposalWithStats;
use bitlings_db::models::stat_block::NewStatBlock;
use bitlings_db::models::vote::{CastVote, VoteOutcome};

use crate::state::AppState;

/// A recorded vote plus whatever promotion produced.
#[derive(Debug)]
pub struct VoteResult {
    pub outcome: VoteOutcome,
    /// Set when this vote promoted the proposal and the creature was added
    /// to the default user's collection.
    pub collected: Option<CollectionEntry>,
}

/// Cast `value` from `voter`, then run promotion side effects if this vote
/// fired the transition.
///
/// The vote itself is never rolled back: a failure while materialising is
/// logged and reported as `collected: None`.
pub async fn cast_vote(
    state: &AppState,
    bitling_id: DbId,
    voter: String,
    value: VoteValue,
) -> Result<VoteResult, CoreError> {
    let outcome = state
        .store
        .cast_vote(
            CastVote {
                bitling_id,
                voter: voter.clone(),
                user_id: None,
                value,
            },
            state.rules.approval_threshold,
        )
        .await?;

    tracing::info!(
        proposal_id = %bitling_id,
        voter = %voter,
        value = value.as_i64(),
        flipped = outcome.change.is_flip(),
        votes = outcome.proposal.tally.votes,
        "Vote recorded",
    );

    let mut collected = None;
    if let Transition::Promoted { from, to } = outcome.transition {
        tracing::info!(
            proposal_id = %bitling_id,
            %from,
            %to,
            votes = outcome.proposal.tally.votes,
            "Promotion fired",
        );
        match collect(state, &state.config.default_user_id, bitling_id).await {
            Ok(entry) => collected = Some(entry),
            Err(CoreError::Conflict(msg)) => tracing::warn!(
                proposal_id = %bitling_id,
                reason = %msg,
                "Skipped collection after promotion",
            ),
            Err(err) => tracing::error!(
                proposal_id = %bitling_id,
                error = %err,
                "Failed to materialise promoted bitling",
            ),
        }
    }

    Ok(VoteResult { outcome, collected })
}

/// Materialise a canonical proposal into `user_id`'s collection, creating a
/// procedural stat block first when the proposal has none.
pub async fn collect(
    state: &AppState,
    user_id: &str,
    bitling_id: DbId,
) -> Result<CollectionEntry, CoreError> {
    let proposal = state.store.get_proposal(bitling_id).await?;
    if !proposal.proposal.status.is_canonical() {
        return Err(CoreError::Conflict(format!(
            "Bitling {bitling_id} is {}; only accepted creatures can be collected",
            proposal.proposal.status
        )));
    }
    ensure_stats(state, &proposal).await?;

    let roll = {
        let mut rng = rand::rng();
        roll_capture(&state.rules, &mut rng)
    };
    let entry = state.store.materialize(user_id, bitling_id, roll).await?;

    tracing::info!(
        proposal_id = %bitling_id,
        user_id = %user_id,
        level = entry.level,
        is_rare = entry.is_rare,
        "Bitling added to collection",
    );
    Ok(entry)
}

/// Give a proposal without a stat block a procedural one, keyed on its
/// primary type. Losing a race to another writer is fine.
async fn ensure_stats(state: &AppState, proposal: &ProposalWithStats) -> Result<(), CoreError> {
    if proposal.stats.is_some() {
        return Ok(());
    }

    let primary = proposal
        .proposal
        .types
        .as_deref()
        .and_then(|types| types.first().copied())
        .unwrap_or(CreatureType::Normal);
    let stats = {
        let mut rng = rand::rng();
        roll_stats(primary, &mut rng)
    };
    let block = NewStatBlock {
        stats,
        moves: moves_for_type(primary),
    };

    match state.store.create_stats(proposal.proposal.id, block).await {
        Ok(_) => {
            tracing::info!(
                proposal_id = %proposal.proposal.id,
                creature_type = %primary,
                "Created procedural stats for promoted bitling",
            );
            Ok(())
        }
        Err(CoreError::Conflict(_)) => Ok(()),
        Err(err) => Err(err),
    }
}
