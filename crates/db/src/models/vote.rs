//! Vote entity and the outcome of casting one.

use bitlings_core::types::{DbId, Timestamp};
use bitlings_core::voting::{Transition, VoteChange, VoteValue};
use serde::Serialize;

use crate::models::proposal::Proposal;

/// One voter's vote on one proposal. At most one exists per
/// `(bitling_id, voter)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: DbId,
    pub bitling_id: DbId,
    /// Pseudo-identity of the voter, usually the client address.
    pub voter: String,
    pub user_id: Option<String>,
    pub value: VoteValue,
    pub created_at: Timestamp,
}

/// DTO for casting a vote.
#[derive(Debug, Clone)]
pub struct CastVote {
    pub bitling_id: DbId,
    pub voter: String,
    pub user_id: Option<String>,
    pub value: VoteValue,
}

/// Everything a single `cast_vote` call changed.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub vote: Vote,
    /// The proposal after counters (and possibly status) were updated.
    pub proposal: Proposal,
    pub change: VoteChange,
    /// Fires at most once per proposal, on the vote that crosses the threshold.
    pub transition: Transition,
}
