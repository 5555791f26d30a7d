//! Creature types, proposal lifecycle, and submission validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of type tags a creature may carry.
pub const MAX_TYPES: usize = 2;

/// Maximum length of a creature name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Maximum length of a creature prompt/description, in characters.
pub const MAX_PROMPT_LEN: usize = 2000;

// ---------------------------------------------------------------------------
// CreatureType
// ---------------------------------------------------------------------------

/// The closed set of elemental types a Bitling can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Ghost,
    Normal,
}

impl CreatureType {
    /// All types, in display order.
    pub const ALL: [CreatureType; 8] = [
        CreatureType::Fire,
        CreatureType::Water,
        CreatureType::Grass,
        CreatureType::Electric,
        CreatureType::Psychic,
        CreatureType::Ice,
        CreatureType::Ghost,
        CreatureType::Normal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CreatureType::Fire => "fire",
            CreatureType::Water => "water",
            CreatureType::Grass => "grass",
            CreatureType::Electric => "electric",
            CreatureType::Psychic => "psychic",
            CreatureType::Ice => "ice",
            CreatureType::Ghost => "ghost",
            CreatureType::Normal => "normal",
        }
    }

    /// Parse a type name, falling back to `Normal` for anything unknown.
    ///
    /// Generator output routinely names types outside the closed set
    /// ("dragon", "steel", ...); those collapse to `Normal`.
    pub fn parse_lenient(raw: &str) -> CreatureType {
        raw.parse().unwrap_or(CreatureType::Normal)
    }
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatureType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CreatureType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| CoreError::Validation(format!("Unknown creature type '{s}'")))
    }
}

/// Validate an explicit type assignment: 1 to [`MAX_TYPES`] distinct entries.
pub fn validate_types(types: &[CreatureType]) -> Result<(), CoreError> {
    if types.is_empty() {
        return Err(CoreError::Validation(
            "types must contain at least one entry".into(),
        ));
    }
    if types.len() > MAX_TYPES {
        return Err(CoreError::Validation(format!(
            "types may contain at most {MAX_TYPES} entries, got {}",
            types.len()
        )));
    }
    if types.len() == 2 && types[0] == types[1] {
        return Err(CoreError::Validation("types must be distinct".into()));
    }
    Ok(())
}

/// Coerce loosely-typed type names into a valid assignment.
///
/// Unknown names become `Normal`, duplicates are dropped (first occurrence
/// wins), the list is truncated to [`MAX_TYPES`], and an empty result
/// becomes `[Normal]`. The output always passes [`validate_types`].
pub fn coerce_types<S: AsRef<str>>(raw: &[S]) -> Vec<CreatureType> {
    let mut out: Vec<CreatureType> = Vec::with_capacity(MAX_TYPES);
    for name in raw {
        let t = CreatureType::parse_lenient(name.as_ref());
        if !out.contains(&t) {
            out.push(t);
        }
        if out.len() == MAX_TYPES {
            break;
        }
    }
    if out.is_empty() {
        out.push(CreatureType::Normal);
    }
    out
}

// ---------------------------------------------------------------------------
// ProposalStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a creature proposal.
///
/// `Proposed -> Voting` is an administrative step. `Voting -> Accepted`
/// fires automatically once net votes reach the approval threshold.
/// `InGame` is reserved for creatures promoted into live gameplay content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalStatus {
    #[default]
    Proposed,
    Voting,
    Accepted,
    InGame,
}

impl ProposalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Proposed => "proposed",
            ProposalStatus::Voting => "voting",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::InGame => "inGame",
        }
    }

    /// Whether a proposal in this status is canonical and may be collected.
    pub fn is_canonical(self) -> bool {
        matches!(self, ProposalStatus::Accepted | ProposalStatus::InGame)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposed" => Ok(ProposalStatus::Proposed),
            "voting" => Ok(ProposalStatus::Voting),
            "accepted" => Ok(ProposalStatus::Accepted),
            "inGame" => Ok(ProposalStatus::InGame),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: proposed, voting, accepted, inGame"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Validate the required fields of a new proposal.
///
/// Name and prompt must be non-blank and within length limits; the image
/// reference must be present and non-blank.
pub fn validate_submission(
    name: &str,
    prompt: &str,
    image_ref: Option<&str>,
) -> Result<(), CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".into()));
    }
    if prompt.chars().count() > MAX_PROMPT_LEN {
        return Err(CoreError::Validation(format!(
            "prompt must be at most {MAX_PROMPT_LEN} characters"
        )));
    }
    match image_ref.map(str::trim) {
        Some(r) if !r.is_empty() => Ok(()),
        _ => Err(CoreError::Validation("imageUrl is required".into())),
    }
}
