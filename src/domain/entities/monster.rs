//! Creatures participating in combat encounters

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::xp_tables::xp_for_rating;

/// A creature (or group of identical creatures) in an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterEntry {
    pub name: String,
    pub quantity: u32,
    pub challenge_rating: f64,
    pub xp: u32,
    pub source_text: String,
}

impl MonsterEntry {
    /// Build an entry, deriving XP from the rating table.
    ///
    /// Negative or non-finite ratings degrade to 0, a zero quantity to 1.
    pub fn new(name: impl Into<String>, challenge_rating: f64, quantity: u32) -> Self {
        let challenge_rating = if challenge_rating.is_finite() && challenge_rating >= 0.0 {
            challenge_rating
        } else {
            0.0
        };
        Self {
            name: name.into(),
            quantity: quantity.max(1),
            challenge_rating,
            xp: xp_for_rating(challenge_rating),
            source_text: String::new(),
        }
    }

    pub fn with_source(mut self, source_text: impl Into<String>) -> Self {
        self.source_text = source_text.into();
        self
    }

    /// Identity used for deduplication
    pub fn dedup_key(&self) -> (String, u64) {
        (self.name.clone(), self.challenge_rating.to_bits())
    }
}

/// Count of creatures sharing a challenge rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCount {
    pub challenge_rating: f64,
    pub count: u32,
}

/// Statistical breakdown of an encounter's creatures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterComposition {
    pub total_count: u32,
    pub avg_cr: f64,
    pub diversity_score: f64,
    /// Sorted by ascending rating
    pub cr_distribution: Vec<RatingCount>,
    pub min_cr: f64,
    pub max_cr: f64,
}
