//! The storage seam shared by the HTTP layer and the promotion engine.

use std::sync::Arc;

use async_trait::async_trait;
use bitlings_core::collection::{summarize, CaptureRoll, CollectionSummary};
use bitlings_core::creature::{CreatureType, ProposalStatus};
use bitlings_core::error::CoreError;
use bitlings_core::listing::{PageRequest, Timeframe};
use bitlings_core::types::{DbId, Timestamp};

use crate::models::collection::CollectionEntry;
use crate::models::proposal::{
    CreateProposal, Proposal, ProposalFilter, ProposalWithStats, StatusUpdate,
};
use crate::models::stat_block::{NewStatBlock, StatBlock};
use crate::models::vote::{CastVote, Vote, VoteOutcome};

/// Shared handle to a store implementation.
pub type DynStore = Arc<dyn BitlingStore>;

/// Entity store for proposals, stat blocks, votes, and collection entries.
///
/// Every method is atomic: it either applies all of its changes or fails
/// before mutating anything.
#[async_trait]
pub trait BitlingStore: Send + Sync {
    // -- proposals ----------------------------------------------------------

    /// Insert a new proposal in `proposed` status with zeroed counters.
    ///
    /// When `input.stat_block` is set, the stat block is created in the same
    /// step; a validation failure in either rejects both.
    async fn create_proposal(&self, input: CreateProposal) -> Result<ProposalWithStats, CoreError>;

    /// Fetch a proposal merged with its stat block.
    async fn get_proposal(&self, id: DbId) -> Result<ProposalWithStats, CoreError>;

    /// List proposals, filtered and sorted, then sliced to `page`.
    async fn list_proposals(
        &self,
        filter: ProposalFilter,
        page: PageRequest,
    ) -> Result<Vec<Proposal>, CoreError>;

    /// Proposals created inside `timeframe` (measured back from `now`),
    /// ordered by net votes descending and truncated to `limit`.
    async fn leaderboard(
        &self,
        timeframe: Timeframe,
        limit: usize,
        now: Timestamp,
    ) -> Result<Vec<Proposal>, CoreError>;

    async fn set_types(&self, id: DbId, types: Vec<CreatureType>) -> Result<Proposal, CoreError>;

    async fn set_status(&self, id: DbId, status: ProposalStatus)
        -> Result<StatusUpdate, CoreError>;

    async fn count_proposals(&self) -> Result<usize, CoreError>;

    // -- stat blocks --------------------------------------------------------

    /// Create the stat block of a proposal. Fails with
    /// [`CoreError::Conflict`] if one already exists.
    async fn create_stats(&self, bitling_id: DbId, block: NewStatBlock)
        -> Result<StatBlock, CoreError>;

    /// Store generated output: create the stat block and replace the type
    /// tags in one step, so no reader sees the new stats with the old types.
    /// Fails with [`CoreError::Conflict`] if a stat block already exists,
    /// leaving the proposal untouched.
    async fn attach_generated(
        &self,
        bitling_id: DbId,
        block: NewStatBlock,
        types: Vec<CreatureType>,
    ) -> Result<ProposalWithStats, CoreError>;

    async fn get_stats(&self, bitling_id: DbId) -> Result<Option<StatBlock>, CoreError>;

    // -- votes --------------------------------------------------------------

    /// Record a vote, update the proposal's counters, and run the promotion
    /// check against `threshold`, all as one atomic step.
    async fn cast_vote(&self, input: CastVote, threshold: i64) -> Result<VoteOutcome, CoreError>;

    async fn find_vote(&self, bitling_id: DbId, voter: &str) -> Result<Option<Vote>, CoreError>;

    // -- collection ---------------------------------------------------------

    /// Copy a canonical proposal and its stat block into `user_id`'s
    /// collection. At most one entry exists per `(user, proposal)`; a second
    /// attempt fails with [`CoreError::Conflict`].
    async fn materialize(
        &self,
        user_id: &str,
        bitling_id: DbId,
        roll: CaptureRoll,
    ) -> Result<CollectionEntry, CoreError>;

    /// All entries owned by `user_id`, highest level first.
    async fn get_collection(&self, user_id: &str) -> Result<Vec<CollectionEntry>, CoreError>;

    /// Summary statistics over `user_id`'s collection.
    async fn collection_stats(
        &self,
        user_id: &str,
        completion_total: u32,
    ) -> Result<CollectionSummary, CoreError> {
        let entries = self.get_collection(user_id).await?;
        Ok(summarize(
            entries.iter().map(|e| (e.types.as_slice(), e.is_rare)),
            completion_total,
        ))
    }
}
