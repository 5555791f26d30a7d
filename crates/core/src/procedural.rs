//! Procedural stat and move generation by creature type.
//!
//! Used to seed demo content and as the fallback stat block when a proposal
//! is promoted before the generator has produced one.

use rand::Rng;

use crate::creature::CreatureType;
use crate::stats::{Move, MoveCategory, Stats};

/// Floor applied to procedurally rolled stats.
pub const ROLLED_STAT_MIN: i32 = 30;
/// Ceiling applied to procedurally rolled stats.
pub const ROLLED_STAT_MAX: i32 = 100;
/// Rolled variation is drawn from `[-VARIATION, VARIATION)`.
pub const VARIATION: i32 = 15;

/// Base stats per type, before variation.
pub fn base_stats(t: CreatureType) -> Stats {
    let (hp, attack, defense, speed) = match t {
        CreatureType::Fire => (65, 85, 60, 90),
        CreatureType::Water => (70, 65, 80, 85),
        CreatureType::Grass => (75, 70, 75, 80),
        CreatureType::Electric => (60, 75, 60, 95),
        CreatureType::Psychic => (65, 95, 60, 90),
        CreatureType::Ice => (70, 80, 70, 80),
        CreatureType::Ghost => (60, 85, 75, 85),
        CreatureType::Normal => (75, 75, 75, 75),
    };
    Stats {
        hp,
        attack,
        defense,
        speed,
    }
}

/// Apply one shared variation to every base stat of `t`, clamped to
/// `[ROLLED_STAT_MIN, ROLLED_STAT_MAX]`.
pub fn stats_with_variation(t: CreatureType, variation: i32) -> Stats {
    let base = base_stats(t);
    let adjust = |v: i32| (v + variation).clamp(ROLLED_STAT_MIN, ROLLED_STAT_MAX);
    Stats {
        hp: adjust(base.hp),
        attack: adjust(base.attack),
        defense: adjust(base.defense),
        speed: adjust(base.speed),
    }
}

/// Roll stats for `t` with a random variation.
pub fn roll_stats<R: Rng + ?Sized>(t: CreatureType, rng: &mut R) -> Stats {
    stats_with_variation(t, rng.random_range(-VARIATION..VARIATION))
}

/// Signature moves per type: (name, power, description).
fn signature_moves(t: CreatureType) -> [(&'static str, i32, &'static str); 3] {
    match t {
        CreatureType::Fire => [
            ("FIRE BREATH", 75, "Unleashes a powerful stream of fire at the opponent."),
            ("EMBER TAIL", 60, "Whips opponent with its ember-tipped tail, may cause burn."),
            ("HEAT WAVE", 85, "Creates a wave of intense heat that damages all opponents."),
        ],
        CreatureType::Water => [
            ("WATER BLAST", 75, "Shoots a powerful jet of water at high pressure."),
            ("BUBBLE BEAM", 65, "Fires a stream of bubbles that may lower speed."),
            ("TIDAL CRASH", 85, "Summons a small tidal wave to crash into the opponent."),
        ],
        CreatureType::Grass => [
            ("VINE WHIP", 70, "Strikes the opponent with vine-like appendages."),
            ("SEED BOMB", 80, "Launches explosive seeds that burst on impact."),
            ("PETAL DANCE", 90, "Unleashes a furious dance of petals, but causes confusion."),
        ],
        CreatureType::Electric => [
            ("THUNDER SHOCK", 75, "Zaps opponent with an electric jolt, may cause paralysis."),
            ("SPARK", 65, "Charges with electricity and tackles, may cause paralysis."),
            ("VOLT TACKLE", 90, "Powerful electric tackle that also damages the user."),
        ],
        CreatureType::Psychic => [
            ("MIND BLAST", 75, "Emits a psychic shock wave that damages the opponent."),
            ("CONFUSION", 60, "Mentally assaults the foe, may cause confusion."),
            ("PSYCHIC WAVE", 85, "Sends a powerful psychic wave that may lower defense."),
        ],
        CreatureType::Ice => [
            ("ICE BEAM", 75, "Fires a freezing beam that may freeze the opponent."),
            ("FROST BITE", 65, "Bites with freezing fangs, may cause frostbite."),
            ("BLIZZARD", 90, "Summons a powerful snowstorm that hits all opponents."),
        ],
        CreatureType::Ghost => [
            ("SHADOW BALL", 75, "Hurls a shadowy blob that may lower defense."),
            ("PHANTOM FORCE", 85, "Disappears and strikes on the next turn."),
            ("SPIRIT SHACKLE", 80, "Stitches the opponent to their shadow, preventing escape."),
        ],
        CreatureType::Normal => [
            ("TACKLE", 50, "A physical attack in which the user charges and slams into the target."),
            ("QUICK ATTACK", 40, "An extremely fast attack that always strikes first."),
            ("HYPER BEAM", 95, "A powerful attack that requires rest afterward."),
        ],
    }
}

/// Levels at which the four procedural moves are learned.
const LEARN_LEVELS: [i32; 4] = [1, 5, 10, 15];

/// PP budget for a signature move: stronger moves get fewer uses.
fn pp_for_power(power: i32) -> i32 {
    if power > 0 {
        (130 / power).max(1)
    } else {
        15
    }
}

/// Build the four-move list for a creature of type `t`: three signature
/// moves followed by the universal quick dash.
pub fn moves_for_type(t: CreatureType) -> Vec<Move> {
    let mut moves: Vec<Move> = signature_moves(t)
        .into_iter()
        .zip(LEARN_LEVELS)
        .map(|((name, power, description), level)| {
            let pp = pp_for_power(power);
            Move {
                name: name.into(),
                move_type: t,
                power,
                accuracy: 100,
                pp,
                max_pp: pp,
                category: MoveCategory::Physical,
                description: description.into(),
                level_learned: level,
            }
        })
        .collect();

    moves.push(Move {
        name: "QUICK DASH".into(),
        move_type: CreatureType::Normal,
        power: 40,
        accuracy: 100,
        pp: 30,
        max_pp: 30,
        category: MoveCategory::Physical,
        description: "Dashes at high speed to strike the opponent first.".into(),
        level_learned: LEARN_LEVELS[3],
    });
    moves
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::stats::{levels_strictly_increasing, validate_stat_block};

    #[test]
    fn variation_is_applied_and_clamped() {
        let s = stats_with_variation(CreatureType::Electric, 10);
        assert_eq!(s, Stats { hp: 70, attack: 85, defense: 70, speed: 100 });

        let low = stats_with_variation(CreatureType::Electric, -15);
        assert_eq!(low.hp, 45);
        assert_eq!(low.speed, 80);
    }

    #[test]
    fn rolled_stats_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for t in CreatureType::ALL {
            for _ in 0..50 {
                let s = roll_stats(t, &mut rng);
                for v in [s.hp, s.attack, s.defense, s.speed] {
                    assert!((ROLLED_STAT_MIN..=ROLLED_STAT_MAX).contains(&v));
                }
            }
        }
    }

    #[test]
    fn every_type_gets_four_valid_moves() {
        for t in CreatureType::ALL {
            let moves = moves_for_type(t);
            assert_eq!(moves.len(), 4);
            assert_eq!(moves[3].name, "QUICK DASH");
            assert!(levels_strictly_increasing(&moves));
            assert!(validate_stat_block(&base_stats(t), &moves).is_ok());
        }
    }

    #[test]
    fn signature_pp_scales_inversely_with_power() {
        let moves = moves_for_type(CreatureType::Fire);
        // 130 / 75 = 1, 130 / 60 = 2
        assert_eq!(moves[0].max_pp, 1);
        assert_eq!(moves[1].max_pp, 2);
        assert_eq!(moves[0].pp, moves[0].max_pp);
    }
}
