//! Value objects - Immutable objects defined by their attributes

mod creature;
mod element_type;
mod ids;
mod party;
mod tiers;
mod weights;
pub mod xp_tables;

pub use creature::{
    CreatureLookup, CreatureRatingCheck, RATING_TOLERANCE, UNKNOWN_CREATURE_RATING,
    UNKNOWN_CREATURE_XP,
};
pub use element_type::ElementType;
pub use ids::*;
pub use party::{PartyProfile, DEFAULT_PARTY_LEVEL, DEFAULT_PARTY_SIZE};
pub use tiers::{EncounterDifficulty, Importance, PuzzleLevel};
pub use weights::{AnalysisWeights, NarrativeWeights, OverallWeights, PuzzleWeights};
pub use xp_tables::XpThresholds;
