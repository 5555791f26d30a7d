//! In-process [`BitlingStore`] backed by hash maps behind a single lock.
//!
//! All tables share one `RwLock`, so every mutating call runs with exclusive
//! access to the whole store. In particular the vote sequence (read the
//! existing vote, write the vote, update counters, check promotion) can
//! never interleave with another vote on the same proposal.

use std::collections::HashMap;

use async_trait::async_trait;
use bitlings_core::collection::{roll_capture, CaptureRoll};
use bitlings_core::creature::{validate_submission, validate_types, CreatureType, ProposalStatus};
use bitlings_core::error::CoreError;
use bitlings_core::listing::{PageRequest, SortKey, Timeframe};
use bitlings_core::procedural;
use bitlings_core::rules::GameRules;
use bitlings_core::types::{new_id, DbId, Timestamp};
use bitlings_core::voting::{evaluate_promotion, resolve_vote, Tally, Transition};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::collection::CollectionEntry;
use crate::models::proposal::{
    CreateProposal, Proposal, ProposalFilter, ProposalWithStats, StatusUpdate,
};
use crate::models::stat_block::{NewStatBlock, StatBlock};
use crate::models::vote::{CastVote, Vote, VoteOutcome};
use crate::seed::demo_proposals;
use crate::store::BitlingStore;

const PROPOSAL: &str = "bitling";

#[derive(Debug, Default)]
struct Tables {
    /// Proposals in insertion order; `index` maps ids to positions.
    proposals: Vec<Proposal>,
    index: HashMap<DbId, usize>,
    stats: HashMap<DbId, StatBlock>,
    votes: HashMap<(DbId, String), Vote>,
    collection: HashMap<String, Vec<CollectionEntry>>,
}

impl Tables {
    fn proposal(&self, id: DbId) -> Result<&Proposal, CoreError> {
        self.index
            .get(&id)
            .map(|&slot| &self.proposals[slot])
            .ok_or(CoreError::NotFound {
                entity: PROPOSAL,
                id,
            })
    }

    fn proposal_mut(&mut self, id: DbId) -> Result<&mut Proposal, CoreError> {
        match self.index.get(&id) {
            Some(&slot) => Ok(&mut self.proposals[slot]),
            None => Err(CoreError::NotFound {
                entity: PROPOSAL,
                id,
            }),
        }
    }

    fn insert_proposal(&mut self, proposal: Proposal) {
        self.index.insert(proposal.id, self.proposals.len());
        self.proposals.push(proposal);
    }

    fn insert_stats(
        &mut self,
        bitling_id: DbId,
        block: NewStatBlock,
        now: Timestamp,
    ) -> Result<StatBlock, CoreError> {
        if self.stats.contains_key(&bitling_id) {
            return Err(CoreError::Conflict(format!(
                "Stats already exist for bitling {bitling_id}"
            )));
        }
        let row = StatBlock {
            id: new_id(),
            bitling_id,
            stats: block.stats,
            moves: block.moves,
            created_at: now,
        };
        self.stats.insert(bitling_id, row.clone());
        Ok(row)
    }

    fn owns(&self, user_id: &str, bitling_id: DbId) -> bool {
        self.collection
            .get(user_id)
            .is_some_and(|entries| entries.iter().any(|e| e.bitling_id == bitling_id))
    }

    fn with_stats(&self, proposal: &Proposal) -> ProposalWithStats {
        let block = self.stats.get(&proposal.id);
        ProposalWithStats {
            proposal: proposal.clone(),
            stats: block.map(|b| b.stats),
            moves: block.map(|b| b.moves.clone()),
        }
    }

    /// Proposals matching `keep`, in insertion order.
    fn select(&self, keep: impl Fn(&Proposal) -> bool) -> Vec<&Proposal> {
        self.proposals.iter().filter(|&p| keep(p)).collect()
    }
}

/// Copy a proposal and its stat block into a fresh collection entry.
fn snapshot(
    user_id: &str,
    proposal: &Proposal,
    block: &StatBlock,
    roll: CaptureRoll,
    now: Timestamp,
) -> CollectionEntry {
    CollectionEntry {
        id: new_id(),
        user_id: user_id.to_string(),
        bitling_id: proposal.id,
        name: proposal.name.clone(),
        prompt: proposal.prompt.clone(),
        image_url: proposal.image_url.clone(),
        types: proposal
            .types
            .clone()
            .unwrap_or_else(|| vec![CreatureType::Normal]),
        stats: block.stats,
        moves: block.moves.clone(),
        nickname: None,
        level: roll.level,
        experience: roll.experience,
        is_rare: roll.is_rare,
        captured_at: now,
    }
}

/// Hash-map backed store; cheap to construct, lives for the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the demo roster. Accepted demo creatures get procedural stats
    /// and are placed in `user_id`'s collection. Returns the number of
    /// proposals inserted.
    pub async fn load_demo(&self, user_id: &str, rules: &GameRules) -> usize {
        let mut tables = self.tables.write().await;
        let mut rng = rand::rng();
        let now = Utc::now();
        let demos = demo_proposals();
        let count = demos.len();

        for demo in demos {
            let created_at = now - demo.age;
            let proposal = Proposal {
                id: new_id(),
                name: demo.name.to_string(),
                prompt: demo.prompt.to_string(),
                image_url: demo.image_url.to_string(),
                creator_handle: Some(demo.creator_handle.to_string()),
                status: demo.status,
                tally: Tally::new(demo.upvotes, demo.downvotes),
                types: Some(vec![demo.creature_type]),
                created_at,
                updated_at: created_at,
            };
            let id = proposal.id;
            tables.insert_proposal(proposal.clone());

            if !demo.status.is_canonical() {
                continue;
            }
            let block = StatBlock {
                id: new_id(),
                bitling_id: id,
                stats: procedural::roll_stats(demo.creature_type, &mut rng),
                moves: procedural::moves_for_type(demo.creature_type),
                created_at,
            };
            let roll = roll_capture(rules, &mut rng);
            let entry = snapshot(user_id, &proposal, &block, roll, created_at);
            tables.stats.insert(id, block);
            tables
                .collection
                .entry(user_id.to_string())
                .or_default()
                .push(entry);
        }

        tracing::info!(count, user_id, "Loaded demo bitlings");
        count
    }
}

#[async_trait]
impl BitlingStore for MemoryStore {
    async fn create_proposal(&self, input: CreateProposal) -> Result<ProposalWithStats, CoreError> {
        validate_submission(&input.name, &input.prompt, input.image_url.as_deref())?;
        if let Some(types) = &input.types {
            validate_types(types)?;
        }
        if let Some(block) = &input.stat_block {
            block.validate()?;
        }

        let now = Utc::now();
        let proposal = Proposal {
            id: new_id(),
            name: input.name.trim().to_string(),
            prompt: input.prompt.trim().to_string(),
            image_url: input
                .image_url
                .map(|url| url.trim().to_string())
                .unwrap_or_default(),
            creator_handle: input
                .creator_handle
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            status: ProposalStatus::Proposed,
            tally: Tally::default(),
            types: input.types,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        if let Some(block) = input.stat_block {
            tables.insert_stats(proposal.id, block, now)?;
        }
        tables.insert_proposal(proposal.clone());
        tracing::debug!(bitling_id = %proposal.id, name = %proposal.name, "Stored proposal");
        Ok(tables.with_stats(&proposal))
    }

    async fn get_proposal(&self, id: DbId) -> Result<ProposalWithStats, CoreError> {
        let tables = self.tables.read().await;
        let proposal = tables.proposal(id)?;
        Ok(tables.with_stats(proposal))
    }

    async fn list_proposals(
        &self,
        filter: ProposalFilter,
        page: PageRequest,
    ) -> Result<Vec<Proposal>, CoreError> {
        let tables = self.tables.read().await;
        let mut rows = tables.select(|p| filter.status.map_or(true, |s| s == p.status));
        // Stable sorts: equal keys stay in insertion order.
        match filter.sort {
            SortKey::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::TopRated => rows.sort_by(|a, b| b.tally.votes.cmp(&a.tally.votes)),
        }
        Ok(page.apply(rows).into_iter().cloned().collect())
    }

    async fn leaderboard(
        &self,
        timeframe: Timeframe,
        limit: usize,
        now: Timestamp,
    ) -> Result<Vec<Proposal>, CoreError> {
        let tables = self.tables.read().await;
        let mut rows = tables.select(|p| timeframe.contains(p.created_at, now));
        rows.sort_by(|a, b| b.tally.votes.cmp(&a.tally.votes));
        Ok(rows.into_iter().take(limit).cloned().collect())
    }

    async fn set_types(&self, id: DbId, types: Vec<CreatureType>) -> Result<Proposal, CoreError> {
        validate_types(&types)?;
        let mut tables = self.tables.write().await;
        let proposal = tables.proposal_mut(id)?;
        proposal.types = Some(types);
        proposal.updated_at = Utc::now();
        Ok(proposal.clone())
    }

    async fn set_status(
        &self,
        id: DbId,
        status: ProposalStatus,
    ) -> Result<StatusUpdate, CoreError> {
        let mut tables = self.tables.write().await;
        let proposal = tables.proposal_mut(id)?;
        let previous = proposal.status;
        proposal.status = status;
        proposal.updated_at = Utc::now();
        Ok(StatusUpdate {
            proposal: proposal.clone(),
            previous,
        })
    }

    async fn count_proposals(&self) -> Result<usize, CoreError> {
        Ok(self.tables.read().await.proposals.len())
    }

    async fn create_stats(
        &self,
        bitling_id: DbId,
        block: NewStatBlock,
    ) -> Result<StatBlock, CoreError> {
        block.validate()?;
        let mut tables = self.tables.write().await;
        tables.proposal(bitling_id)?;
        tables.insert_stats(bitling_id, block, Utc::now())
    }

    async fn attach_generated(
        &self,
        bitling_id: DbId,
        block: NewStatBlock,
        types: Vec<CreatureType>,
    ) -> Result<ProposalWithStats, CoreError> {
        block.validate()?;
        validate_types(&types)?;
        let mut tables = self.tables.write().await;
        tables.proposal(bitling_id)?;
        let now = Utc::now();
        tables.insert_stats(bitling_id, block, now)?;
        let proposal = tables.proposal_mut(bitling_id)?;
        proposal.types = Some(types);
        proposal.updated_at = now;
        let proposal = proposal.clone();
        Ok(tables.with_stats(&proposal))
    }

    async fn get_stats(&self, bitling_id: DbId) -> Result<Option<StatBlock>, CoreError> {
        Ok(self.tables.read().await.stats.get(&bitling_id).cloned())
    }

    async fn cast_vote(&self, input: CastVote, threshold: i64) -> Result<VoteOutcome, CoreError> {
        let mut tables = self.tables.write().await;
        let Tables {
            proposals,
            index,
            votes,
            ..
        } = &mut *tables;

        let slot = *index.get(&input.bitling_id).ok_or(CoreError::NotFound {
            entity: PROPOSAL,
            id: input.bitling_id,
        })?;
        let key = (input.bitling_id, input.voter.clone());
        let change = resolve_vote(votes.get(&key).map(|v| v.value), input.value)?;

        let now = Utc::now();
        let proposal = &mut proposals[slot];
        proposal.tally = proposal.tally.apply(change);
        let transition = evaluate_promotion(proposal.status, proposal.tally.votes, threshold);
        if let Transition::Promoted { to, .. } = transition {
            proposal.status = to;
        }
        proposal.updated_at = now;
        let proposal = proposal.clone();

        let vote = votes
            .entry(key)
            .and_modify(|v| v.value = input.value)
            .or_insert_with(|| Vote {
                id: new_id(),
                bitling_id: input.bitling_id,
                voter: input.voter,
                user_id: input.user_id,
                value: input.value,
                created_at: now,
            })
            .clone();

        Ok(VoteOutcome {
            vote,
            proposal,
            change,
            transition,
        })
    }

    async fn find_vote(&self, bitling_id: DbId, voter: &str) -> Result<Option<Vote>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.votes.get(&(bitling_id, voter.to_string())).cloned())
    }

    async fn materialize(
        &self,
        user_id: &str,
        bitling_id: DbId,
        roll: CaptureRoll,
    ) -> Result<CollectionEntry, CoreError> {
        let mut tables = self.tables.write().await;
        let proposal = tables.proposal(bitling_id)?;
        if !proposal.status.is_canonical() {
            return Err(CoreError::Conflict(format!(
                "Bitling {bitling_id} is {}; only accepted creatures can be collected",
                proposal.status
            )));
        }
        if tables.owns(user_id, bitling_id) {
            return Err(CoreError::Conflict(format!(
                "Bitling {bitling_id} is already in the collection of {user_id}"
            )));
        }
        let block = tables.stats.get(&bitling_id).ok_or_else(|| {
            CoreError::Conflict(format!("Bitling {bitling_id} has no stats to collect"))
        })?;

        let entry = snapshot(user_id, proposal, block, roll, Utc::now());
        tables
            .collection
            .entry(user_id.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    async fn get_collection(&self, user_id: &str) -> Result<Vec<CollectionEntry>, CoreError> {
        let tables = self.tables.read().await;
        let mut entries = tables.collection.get(user_id).cloned().unwrap_or_default();
        entries.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then_with(|| b.captured_at.cmp(&a.captured_at))
        });
        Ok(entries)
    }
}
