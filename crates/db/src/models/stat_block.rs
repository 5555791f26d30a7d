//! Stat block entity: the generated stats and moves of one proposal.

use bitlings_core::error::CoreError;
use bitlings_core::stats::{validate_stat_block, Move, Stats};
use bitlings_core::types::{DbId, Timestamp};
use serde::Serialize;

/// Stats and moves owned one-to-one by a proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    pub id: DbId,
    pub bitling_id: DbId,
    pub stats: Stats,
    pub moves: Vec<Move>,
    pub created_at: Timestamp,
}

/// DTO for creating a stat block.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStatBlock {
    pub stats: Stats,
    pub moves: Vec<Move>,
}

impl NewStatBlock {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_stat_block(&self.stats, &self.moves)
    }
}
