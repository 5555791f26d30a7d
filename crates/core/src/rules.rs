//! Tunable game rules shared by the store and the HTTP layer.

use std::ops::RangeInclusive;

use crate::creature::CreatureType;
use crate::voting::DEFAULT_APPROVAL_THRESHOLD;

/// Creatures planned per type; with eight types the full roster is 40.
pub const CREATURES_PER_TYPE: u32 = 5;

/// Knobs that govern promotion and collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    /// Net votes a `voting` proposal needs to become `accepted`.
    pub approval_threshold: i64,
    /// Denominator of the collection completion percentage.
    pub completion_total: u32,
    /// Level range rolled at capture time.
    pub capture_levels: RangeInclusive<i32>,
    /// Experience granted per level.
    pub experience_per_level: i64,
    /// Probability that a captured creature is rare.
    pub rare_chance: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            completion_total: CreatureType::ALL.len() as u32 * CREATURES_PER_TYPE,
            capture_levels: 5..=15,
            experience_per_level: 100,
            rare_chance: 0.2,
        }
    }
}

impl GameRules {
    /// Default rules with a custom approval threshold.
    pub fn with_threshold(approval_threshold: i64) -> Self {
        Self {
            approval_threshold,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_design() {
        let r = GameRules::default();
        assert_eq!(r.approval_threshold, 10);
        assert_eq!(r.completion_total, 40);
        assert_eq!(r.capture_levels, 5..=15);
    }

    #[test]
    fn threshold_override_keeps_other_defaults() {
        let r = GameRules::with_threshold(3);
        assert_eq!(r.approval_threshold, 3);
        assert_eq!(r.completion_total, 40);
    }
}
