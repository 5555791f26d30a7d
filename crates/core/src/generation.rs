//! Normalisation of generator output into a strongly-typed bundle.
//!
//! The generative capability answers with loosely-shaped JSON. Nothing it
//! returns is trusted: every field is read through a lenient accessor,
//! clamped into its legal range, and replaced by a fixed default when it is
//! missing or unusable. Each substitution is recorded as a [`Repair`] so
//! callers can log what was patched.
//!
//! The output of [`normalize_bundle`] always satisfies
//! [`crate::stats::validate_stat_block`] and [`crate::creature::validate_types`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::creature::{coerce_types, CreatureType};
use crate::stats::{
    clamp_stat, Move, MoveCategory, Stats, ACCURACY_MAX, LEVEL_LEARNED_MAX, LEVEL_LEARNED_MIN,
    MAX_MOVES, POWER_MAX, PP_DEFAULT, PP_MAX, STAT_BASELINE,
};

/// Placeholder used when the generator omits a description.
pub const DEFAULT_DESCRIPTION: &str = "A mysterious creature with unknown origins.";

/// Placeholder used when the generator omits behaviour prose.
pub const DEFAULT_BEHAVIOR: &str =
    "Behaves cautiously around strangers but is friendly once it trusts you.";

/// A fully validated generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBundle {
    pub types: Vec<CreatureType>,
    pub stats: Stats,
    pub moves: Vec<Move>,
    pub description: String,
    pub behavior: String,
}

impl Default for GeneratedBundle {
    fn default() -> Self {
        Self {
            types: vec![CreatureType::Normal],
            stats: Stats::BASELINE,
            moves: vec![Move::baseline()],
            description: DEFAULT_DESCRIPTION.into(),
            behavior: DEFAULT_BEHAVIOR.into(),
        }
    }
}

/// One substitution made while normalising generator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// The response body was not a JSON object at all.
    Unparseable,
    MissingTypes,
    MissingStats,
    /// A single stat was missing, non-numeric, or out of range.
    StatField(&'static str),
    MissingMoves,
    /// A move entry was dropped or had fields replaced.
    MoveEntry(usize),
    /// Extra moves beyond [`MAX_MOVES`] were discarded.
    MovesTruncated,
    MissingDescription,
    MissingBehavior,
}

/// A normalised bundle together with the repairs that produced it.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub bundle: GeneratedBundle,
    pub repairs: Vec<Repair>,
}

impl Normalized {
    pub fn was_repaired(&self) -> bool {
        !self.repairs.is_empty()
    }
}

/// Parse raw generator text and normalise it.
///
/// Surrounding prose is tolerated: the outermost `{ ... }` span is parsed.
/// Text that does not contain a JSON object yields the full default bundle.
pub fn parse_generator_output(content: &str) -> Normalized {
    match extract_json(content).and_then(|s| serde_json::from_str::<Value>(s).ok()) {
        Some(value @ Value::Object(_)) => normalize_bundle(&value),
        _ => Normalized {
            bundle: GeneratedBundle::default(),
            repairs: vec![Repair::Unparseable],
        },
    }
}

/// Normalise an already-parsed generator response.
pub fn normalize_bundle(value: &Value) -> Normalized {
    let mut repairs = Vec::new();

    let names: Vec<&str> = value
        .get("types")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let types = if names.is_empty() {
        repairs.push(Repair::MissingTypes);
        vec![CreatureType::Normal]
    } else {
        coerce_types(&names)
    };

    let stats = match value.get("stats") {
        Some(raw @ Value::Object(_)) => normalize_stats(raw, &mut repairs),
        _ => {
            repairs.push(Repair::MissingStats);
            Stats::BASELINE
        }
    };

    let moves = match value.get("moves") {
        Some(raw @ Value::Array(_)) => normalize_moves(raw, &mut repairs),
        _ => {
            repairs.push(Repair::MissingMoves);
            vec![Move::baseline()]
        }
    };

    let description = text_or(value.get("description"), DEFAULT_DESCRIPTION, || {
        repairs.push(Repair::MissingDescription)
    });
    let behavior = text_or(value.get("behavior"), DEFAULT_BEHAVIOR, || {
        repairs.push(Repair::MissingBehavior)
    });

    Normalized {
        bundle: GeneratedBundle {
            types,
            stats,
            moves,
            description,
            behavior,
        },
        repairs,
    }
}

/// Normalise a stats object. Missing or non-numeric fields become the
/// baseline; numeric fields are clamped.
pub fn normalize_stats(raw: &Value, repairs: &mut Vec<Repair>) -> Stats {
    let mut field = |name: &'static str| match raw.get(name).and_then(as_number) {
        Some(v) => {
            let clamped = clamp_stat(v);
            if clamped != v {
                repairs.push(Repair::StatField(name));
            }
            clamped
        }
        None => {
            repairs.push(Repair::StatField(name));
            STAT_BASELINE
        }
    };

    Stats {
        hp: field("hp"),
        attack: field("attack"),
        defense: field("defense"),
        speed: field("speed"),
    }
}

/// Normalise a move list. Non-object entries are dropped; an empty result
/// becomes the single baseline move.
pub fn normalize_moves(raw: &Value, repairs: &mut Vec<Repair>) -> Vec<Move> {
    let Some(list) = raw.as_array() else {
        repairs.push(Repair::MissingMoves);
        return vec![Move::baseline()];
    };

    let mut moves = Vec::with_capacity(list.len().min(MAX_MOVES));
    for (idx, entry) in list.iter().enumerate() {
        if moves.len() == MAX_MOVES {
            repairs.push(Repair::MovesTruncated);
            break;
        }
        match normalize_move(entry) {
            Some((mv, patched)) => {
                if patched {
                    repairs.push(Repair::MoveEntry(idx));
                }
                moves.push(mv);
            }
            None => repairs.push(Repair::MoveEntry(idx)),
        }
    }

    if moves.is_empty() {
        repairs.push(Repair::MissingMoves);
        moves.push(Move::baseline());
    }
    moves
}

/// Normalise one move entry. Returns `None` for non-objects, otherwise the
/// move plus whether any field had to be patched.
fn normalize_move(entry: &Value) -> Option<(Move, bool)> {
    let obj = entry.as_object()?;
    let mut patched = false;

    let name = match obj.get("name").and_then(Value::as_str).map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            patched = true;
            "Tackle".to_string()
        }
    };

    let move_type = match obj.get("type").and_then(Value::as_str) {
        Some(t) => {
            let parsed = CreatureType::parse_lenient(t);
            patched |= parsed.as_str() != t.trim().to_ascii_lowercase();
            parsed
        }
        None => {
            patched = true;
            CreatureType::Normal
        }
    };

    let mut power = clamped_field(obj.get("power"), 0, 0, POWER_MAX, &mut patched);

    let category = match obj
        .get("category")
        .and_then(Value::as_str)
        .and_then(MoveCategory::parse_lenient)
    {
        Some(c) => c,
        None if power == 0 => MoveCategory::Status,
        None => {
            patched = true;
            MoveCategory::Physical
        }
    };
    if category == MoveCategory::Status && power != 0 {
        patched = true;
        power = 0;
    }

    let accuracy = clamped_field(obj.get("accuracy"), ACCURACY_MAX, 0, ACCURACY_MAX, &mut patched);

    let raw_pp = obj.get("pp").and_then(as_number);
    let raw_max = obj.get("maxPp").and_then(as_number);
    let max_pp_source = raw_max.or(raw_pp);
    if max_pp_source.is_none() {
        patched = true;
    }
    let max_pp = max_pp_source.unwrap_or(PP_DEFAULT).clamp(1, PP_MAX);
    let pp = raw_pp.unwrap_or(max_pp).clamp(1, max_pp);
    patched |= Some(max_pp) != max_pp_source || raw_pp.is_some_and(|p| p != pp);

    let level_learned = clamped_field(
        obj.get("levelLearned"),
        LEVEL_LEARNED_MIN,
        LEVEL_LEARNED_MIN,
        LEVEL_LEARNED_MAX,
        &mut patched,
    );

    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Some((
        Move {
            name,
            move_type,
            power,
            accuracy,
            pp,
            max_pp,
            category,
            description,
            level_learned,
        },
        patched,
    ))
}

/// Read an integer field, substituting `default` when absent/non-numeric and
/// clamping into `[min, max]`. Sets `patched` on any substitution.
fn clamped_field(raw: Option<&Value>, default: i32, min: i32, max: i32, patched: &mut bool) -> i32 {
    match raw.and_then(as_number) {
        Some(v) => {
            let c = v.clamp(min, max);
            *patched |= c != v;
            c
        }
        None => {
            *patched = true;
            default
        }
    }
}

/// Read a JSON number (integer, float, or numeric string) as an `i32`.
///
/// Floats are rounded; values beyond `i32` saturate so clamping still
/// applies. Non-finite or non-numeric values return `None`.
fn as_number(value: &Value) -> Option<i32> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !f.is_finite() {
        return None;
    }
    Some(f.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

fn text_or(raw: Option<&Value>, default: &str, on_default: impl FnOnce()) -> String {
    match raw.and_then(Value::as_str).map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            on_default();
            default.to_string()
        }
    }
}

/// Extract the outermost JSON object from model output (handles prose or
/// code fences around it).
fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}
