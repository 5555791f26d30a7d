//! Creature proposal entity and DTOs.

use bitlings_core::creature::{CreatureType, ProposalStatus};
use bitlings_core::stats::{Move, Stats};
use bitlings_core::types::{DbId, Timestamp};
use bitlings_core::voting::Tally;
use serde::Serialize;

use crate::models::stat_block::NewStatBlock;

/// A user-submitted creature.
///
/// Invariant: `tally.votes == tally.upvotes - tally.downvotes`; `types`,
/// when present, holds one or two distinct entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: DbId,
    pub name: String,
    pub prompt: String,
    pub image_url: String,
    pub creator_handle: Option<String>,
    pub status: ProposalStatus,
    #[serde(flatten)]
    pub tally: Tally,
    pub types: Option<Vec<CreatureType>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A proposal merged with its stat block, when one exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalWithStats {
    #[serde(flatten)]
    pub proposal: Proposal,
    pub stats: Option<Stats>,
    pub moves: Option<Vec<Move>>,
}

/// DTO for creating a new proposal.
#[derive(Debug, Clone, Default)]
pub struct CreateProposal {
    pub name: String,
    pub prompt: String,
    pub image_url: Option<String>,
    pub creator_handle: Option<String>,
    pub types: Option<Vec<CreatureType>>,
    /// Stat block created in the same step as the proposal.
    pub stat_block: Option<NewStatBlock>,
}

/// Filters and ordering for proposal listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalFilter {
    pub status: Option<ProposalStatus>,
    pub sort: bitlings_core::listing::SortKey,
}

/// Result of an administrative status change.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub proposal: Proposal,
    pub previous: ProposalStatus,
}

impl StatusUpdate {
    /// Whether this change moved the proposal into a canonical status.
    pub fn became_canonical(&self) -> bool {
        !self.previous.is_canonical() && self.proposal.status.is_canonical()
    }
}
