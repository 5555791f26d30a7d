//! Collection entry entity.

use bitlings_core::creature::CreatureType;
use bitlings_core::stats::{Move, Stats};
use bitlings_core::types::{DbId, Timestamp};
use serde::Serialize;

/// A user's copy of a canonical proposal.
///
/// Name, image, types, stats and moves are copied at capture time; later
/// edits to the source proposal or its stat block are not reflected here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    pub id: DbId,
    pub user_id: String,
    pub bitling_id: DbId,
    pub name: String,
    pub prompt: String,
    pub image_url: String,
    pub types: Vec<CreatureType>,
    pub stats: Stats,
    pub moves: Vec<Move>,
    pub nickname: Option<String>,
    pub level: i32,
    pub experience: i64,
    pub is_rare: bool,
    pub captured_at: Timestamp,
}
