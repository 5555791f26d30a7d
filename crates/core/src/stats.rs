//! Stat blocks and moves: shapes, valid ranges, and baseline defaults.

use serde::{Deserialize, Serialize};

use crate::creature::CreatureType;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Lowest legal value of any base stat.
pub const STAT_MIN: i32 = 1;
/// Highest legal value of any base stat.
pub const STAT_MAX: i32 = 100;
/// Value substituted for a missing or non-numeric stat.
pub const STAT_BASELINE: i32 = 40;

/// Highest move power. Status moves have power 0.
pub const POWER_MAX: i32 = 120;
/// Highest move accuracy (percent).
pub const ACCURACY_MAX: i32 = 100;
/// Highest PP any move may carry.
pub const PP_MAX: i32 = 64;
/// PP substituted when neither `pp` nor `maxPp` is given.
pub const PP_DEFAULT: i32 = 10;
/// Earliest and latest level at which a move can be learned.
pub const LEVEL_LEARNED_MIN: i32 = 1;
pub const LEVEL_LEARNED_MAX: i32 = 36;
/// Maximum number of moves kept per creature.
pub const MAX_MOVES: usize = 8;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Base stats of a creature. Each field lies in `[STAT_MIN, STAT_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl Stats {
    /// The fixed baseline used when a generator omits stats entirely.
    pub const BASELINE: Stats = Stats {
        hp: STAT_BASELINE,
        attack: STAT_BASELINE,
        defense: STAT_BASELINE,
        speed: STAT_BASELINE,
    };

    /// Return a copy with every field clamped into the legal range.
    pub fn clamped(self) -> Stats {
        Stats {
            hp: clamp_stat(self.hp),
            attack: clamp_stat(self.attack),
            defense: clamp_stat(self.defense),
            speed: clamp_stat(self.speed),
        }
    }

    pub fn total(&self) -> i32 {
        self.hp + self.attack + self.defense + self.speed
    }
}

/// Clamp a single stat value into `[STAT_MIN, STAT_MAX]`.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// How a move deals (or doesn't deal) damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn parse_lenient(raw: &str) -> Option<MoveCategory> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(MoveCategory::Physical),
            "special" => Some(MoveCategory::Special),
            "status" => Some(MoveCategory::Status),
            _ => None,
        }
    }
}

/// A single move in a creature's move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: CreatureType,
    /// 0 for status moves, otherwise typically 40..=120.
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
    pub max_pp: i32,
    pub category: MoveCategory,
    pub description: String,
    pub level_learned: i32,
}

impl Move {
    /// The single move substituted when a generator returns no move list.
    pub fn baseline() -> Move {
        Move {
            name: "Tackle".into(),
            move_type: CreatureType::Normal,
            power: 40,
            accuracy: 100,
            pp: 35,
            max_pp: 35,
            category: MoveCategory::Physical,
            description: "A physical attack in which the user charges and slams into the target \
                          with its whole body."
                .into(),
            level_learned: 1,
        }
    }

    /// Check the invariants of a single move.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("move name must not be empty".into()));
        }
        if !(0..=POWER_MAX).contains(&self.power) {
            return Err(CoreError::Validation(format!(
                "move '{}' power must be between 0 and {POWER_MAX}",
                self.name
            )));
        }
        if !(0..=ACCURACY_MAX).contains(&self.accuracy) {
            return Err(CoreError::Validation(format!(
                "move '{}' accuracy must be between 0 and {ACCURACY_MAX}",
                self.name
            )));
        }
        if self.max_pp < 1 || self.pp < 1 || self.pp > self.max_pp {
            return Err(CoreError::Validation(format!(
                "move '{}' must satisfy 1 <= pp <= maxPp",
                self.name
            )));
        }
        if !(LEVEL_LEARNED_MIN..=LEVEL_LEARNED_MAX).contains(&self.level_learned) {
            return Err(CoreError::Validation(format!(
                "move '{}' levelLearned must be between {LEVEL_LEARNED_MIN} and {LEVEL_LEARNED_MAX}",
                self.name
            )));
        }
        Ok(())
    }
}

/// Validate a full stat block before it is persisted.
pub fn validate_stat_block(stats: &Stats, moves: &[Move]) -> Result<(), CoreError> {
    for (label, v) in [
        ("hp", stats.hp),
        ("attack", stats.attack),
        ("defense", stats.defense),
        ("speed", stats.speed),
    ] {
        if !(STAT_MIN..=STAT_MAX).contains(&v) {
            return Err(CoreError::Validation(format!(
                "{label} must be between {STAT_MIN} and {STAT_MAX}, got {v}"
            )));
        }
    }
    if moves.is_empty() {
        return Err(CoreError::Validation("a stat block needs at least one move".into()));
    }
    if moves.len() > MAX_MOVES {
        return Err(CoreError::Validation(format!(
            "a stat block may hold at most {MAX_MOVES} moves"
        )));
    }
    moves.iter().try_for_each(Move::validate)
}

/// Whether the move list is learned at strictly increasing levels.
///
/// Desired but not enforced; callers use it for logging only.
pub fn levels_strictly_increasing(moves: &[Move]) -> bool {
    moves
        .windows(2)
        .all(|w| w[0].level_learned < w[1].level_learned)
}
