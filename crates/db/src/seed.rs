//! Demo proposals loaded into a fresh store when `SEED_DEMO_DATA` is on.

use bitlings_core::creature::{CreatureType, ProposalStatus};
use chrono::Duration;

/// One row of demo content.
#[derive(Debug, Clone)]
pub struct DemoProposal {
    pub name: &'static str,
    pub prompt: &'static str,
    pub image_url: &'static str,
    pub creator_handle: &'static str,
    pub status: ProposalStatus,
    pub upvotes: i64,
    pub downvotes: i64,
    pub creature_type: CreatureType,
    /// How long before "now" the proposal was created.
    pub age: Duration,
}

/// The demo roster: four accepted creatures and two still in voting.
pub fn demo_proposals() -> Vec<DemoProposal> {
    vec![
        DemoProposal {
            name: "AQUABYTE",
            prompt: "A sleek aquatic creature with shimmering scales and fin-like ears.",
            image_url: "https://via.placeholder.com/400x300/2196F3/FFFFFF?text=Aquabyte",
            creator_handle: "watertrainer",
            status: ProposalStatus::Accepted,
            upvotes: 24,
            downvotes: 3,
            creature_type: CreatureType::Water,
            age: Duration::days(7),
        },
        DemoProposal {
            name: "FLAMELOX",
            prompt: "A fox-like creature with fiery fur and ember-tipped tail that glows in the dark.",
            image_url: "https://via.placeholder.com/400x300/FF5722/FFFFFF?text=Flamelox",
            creator_handle: "flamecreator",
            status: ProposalStatus::Accepted,
            upvotes: 42,
            downvotes: 7,
            creature_type: CreatureType::Fire,
            age: Duration::days(5),
        },
        DemoProposal {
            name: "LEAFLET",
            prompt: "A small plant-based creature with leaf-like appendages and flower buds on its back.",
            image_url: "https://via.placeholder.com/400x300/4CAF50/FFFFFF?text=Leaflet",
            creator_handle: "naturelover",
            status: ProposalStatus::Accepted,
            upvotes: 18,
            downvotes: 2,
            creature_type: CreatureType::Grass,
            age: Duration::days(3),
        },
        DemoProposal {
            name: "ZAPZAP",
            prompt: "A small electric rodent with lightning bolt markings and static-charged fur.",
            image_url: "https://via.placeholder.com/400x300/FFEB3B/212121?text=ZapZap",
            creator_handle: "shockmaster",
            status: ProposalStatus::Accepted,
            upvotes: 31,
            downvotes: 5,
            creature_type: CreatureType::Electric,
            age: Duration::days(2),
        },
        DemoProposal {
            name: "PSYCAT",
            prompt: "A feline creature with glowing purple eyes and telepathic abilities.",
            image_url: "https://via.placeholder.com/400x300/9C27B0/FFFFFF?text=PsyCat",
            creator_handle: "mindmaster",
            status: ProposalStatus::Voting,
            upvotes: 15,
            downvotes: 2,
            creature_type: CreatureType::Psychic,
            age: Duration::days(1),
        },
        DemoProposal {
            name: "FROSTBITE",
            prompt: "A small ice fox with crystals forming on its tail and ears.",
            image_url: "https://via.placeholder.com/400x300/00BCD4/FFFFFF?text=Frostbite",
            creator_handle: "icecaster",
            status: ProposalStatus::Voting,
            upvotes: 12,
            downvotes: 3,
            creature_type: CreatureType::Ice,
            age: Duration::hours(12),
        },
    ]
}
