//! Vote arithmetic and the promotion state transition.
//!
//! The store applies these rules atomically; this module only decides what
//! a vote does to a tally and whether a proposal crosses into `accepted`.

use serde::{Deserialize, Serialize};

use crate::creature::ProposalStatus;
use crate::error::CoreError;

/// Net votes a `voting` proposal needs before it is promoted.
pub const DEFAULT_APPROVAL_THRESHOLD: i64 = 10;

// ---------------------------------------------------------------------------
// VoteValue
// ---------------------------------------------------------------------------

/// A single signed vote. Serialised as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i64(self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = CoreError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(CoreError::Validation(format!(
                "vote must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl From<VoteValue> for i64 {
    fn from(v: VoteValue) -> i64 {
        v.as_i64()
    }
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Aggregate vote counters of a proposal.
///
/// Invariant: `votes == upvotes - downvotes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub upvotes: i64,
    pub downvotes: i64,
    pub votes: i64,
}

impl Tally {
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self {
            upvotes,
            downvotes,
            votes: upvotes - downvotes,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.votes == self.upvotes - self.downvotes
    }

    /// Apply a resolved vote change, returning the new tally.
    pub fn apply(self, change: VoteChange) -> Tally {
        let (up, down) = match change {
            VoteChange::Created(VoteValue::Up) => (1, 0),
            VoteChange::Created(VoteValue::Down) => (0, 1),
            VoteChange::Flipped {
                to: VoteValue::Up, ..
            } => (1, -1),
            VoteChange::Flipped {
                to: VoteValue::Down,
                ..
            } => (-1, 1),
        };
        Tally::new(self.upvotes + up, self.downvotes + down)
    }
}

// ---------------------------------------------------------------------------
// Vote resolution
// ---------------------------------------------------------------------------

/// What a vote does to the caller's existing vote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// No prior vote: a new row is created.
    Created(VoteValue),
    /// A prior vote in the opposite direction is flipped in place.
    Flipped { from: VoteValue, to: VoteValue },
}

impl VoteChange {
    /// Signed change to the net vote count (`+-1` for new votes, `+-2` for flips).
    pub fn net_delta(self) -> i64 {
        match self {
            VoteChange::Created(v) => v.as_i64(),
            VoteChange::Flipped { from, to } => to.as_i64() - from.as_i64(),
        }
    }

    pub fn is_flip(self) -> bool {
        matches!(self, VoteChange::Flipped { .. })
    }

    pub fn value(self) -> VoteValue {
        match self {
            VoteChange::Created(v) | VoteChange::Flipped { to: v, .. } => v,
        }
    }
}

/// Decide how a new vote interacts with the caller's existing vote.
///
/// A repeat vote in the same direction is rejected with
/// [`CoreError::DuplicateVote`] and must not mutate anything.
pub fn resolve_vote(existing: Option<VoteValue>, new: VoteValue) -> Result<VoteChange, CoreError> {
    match existing {
        None => Ok(VoteChange::Created(new)),
        Some(old) if old == new => Err(CoreError::DuplicateVote(
            "You've already voted this way".into(),
        )),
        Some(old) => Ok(VoteChange::Flipped { from: old, to: new }),
    }
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

/// Result of running the promotion check after a counter mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The proposal crossed the threshold on this mutation.
    Promoted { from: ProposalStatus, to: ProposalStatus },
    Unchanged,
}

impl Transition {
    pub fn fired(self) -> bool {
        matches!(self, Transition::Promoted { .. })
    }
}

/// Decide whether a proposal should be promoted.
///
/// Only a `voting` proposal whose net votes reach `threshold` moves to
/// `accepted`. Any other status is left alone, so re-running the check on an
/// already accepted proposal never fires again.
pub fn evaluate_promotion(status: ProposalStatus, net_votes: i64, threshold: i64) -> Transition {
    if status == ProposalStatus::Voting && net_votes >= threshold {
        Transition::Promoted {
            from: status,
            to: ProposalStatus::Accepted,
        }
    } else {
        Transition::Unchanged
    }
}
