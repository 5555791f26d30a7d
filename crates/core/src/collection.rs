//! Capture rolls and collection summary statistics.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;

use crate::creature::CreatureType;
use crate::rules::GameRules;

/// Per-entry values rolled when a creature enters a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRoll {
    pub level: i32,
    pub experience: i64,
    pub is_rare: bool,
}

/// Roll level, derived experience, and rarity for a new collection entry.
pub fn roll_capture<R: Rng + ?Sized>(rules: &GameRules, rng: &mut R) -> CaptureRoll {
    let level = rng.random_range(rules.capture_levels.clone());
    CaptureRoll {
        level,
        experience: experience_for_level(level, rules),
        is_rare: rng.random_bool(rules.rare_chance.clamp(0.0, 1.0)),
    }
}

/// Experience implied by a level.
pub fn experience_for_level(level: i32, rules: &GameRules) -> i64 {
    i64::from(level) * rules.experience_per_level
}

/// Aggregate statistics over a user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub total: usize,
    pub distinct_type_count: usize,
    pub rare_count: usize,
    /// `floor(total / completion_total * 100)`.
    pub completion_percentage: u32,
    /// `completion_percentage` formatted for display, e.g. `"15%"`.
    pub completion: String,
}

/// Summarise a collection given each entry's types and rarity flag.
pub fn summarize<'a, I>(entries: I, completion_total: u32) -> CollectionSummary
where
    I: IntoIterator<Item = (&'a [CreatureType], bool)>,
{
    let mut total = 0usize;
    let mut rare_count = 0usize;
    let mut types = BTreeSet::new();

    for (entry_types, is_rare) in entries {
        total += 1;
        if is_rare {
            rare_count += 1;
        }
        types.extend(entry_types.iter().copied());
    }

    let completion_percentage = completion_percentage(total, completion_total);
    CollectionSummary {
        total,
        distinct_type_count: types.len(),
        rare_count,
        completion_percentage,
        completion: format!("{completion_percentage}%"),
    }
}

/// `floor(total / completion_total * 100)`, or 0 when the roster is empty.
pub fn completion_percentage(total: usize, completion_total: u32) -> u32 {
    if completion_total == 0 {
        return 0;
    }
    ((total as u64 * 100) / u64::from(completion_total)) as u32
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn capture_roll_respects_rules() {
        let rules = GameRules::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let roll = roll_capture(&rules, &mut rng);
            assert!(rules.capture_levels.contains(&roll.level));
            assert_eq!(roll.experience, i64::from(roll.level) * 100);
        }
    }

    #[test]
    fn rarity_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let never = GameRules {
            rare_chance: 0.0,
            ..GameRules::default()
        };
        let always = GameRules {
            rare_chance: 1.0,
            ..GameRules::default()
        };
        assert!(!roll_capture(&never, &mut rng).is_rare);
        assert!(roll_capture(&always, &mut rng).is_rare);
    }

    #[test]
    fn summary_counts_distinct_types_and_rares() {
        let fire = [CreatureType::Fire];
        let water = [CreatureType::Water];
        let entries: Vec<(&[CreatureType], bool)> =
            vec![(&fire, false), (&water, true), (&fire, false)];

        let s = summarize(entries, 40);
        assert_eq!(s.total, 3);
        assert_eq!(s.distinct_type_count, 2);
        assert_eq!(s.rare_count, 1);
        assert_eq!(s.completion_percentage, 7);
        assert_eq!(s.completion, "7%");
    }

    #[test]
    fn dual_types_count_towards_union() {
        let dual = [CreatureType::Ice, CreatureType::Ghost];
        let ice = [CreatureType::Ice];
        let s = summarize(vec![(&dual[..], false), (&ice[..], false)], 40);
        assert_eq!(s.distinct_type_count, 2);
    }

    #[test]
    fn empty_collection() {
        let s = summarize(Vec::<(&[CreatureType], bool)>::new(), 40);
        assert_eq!(s.total, 0);
        assert_eq!(s.completion, "0%");
    }

    #[test]
    fn completion_is_floored_and_safe() {
        assert_eq!(completion_percentage(6, 40), 15);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(5, 0), 0);
    }
}
