//! Results produced by the individual analyzers
//!
//! All results are plain values computed fresh for each call.

use serde::{Deserialize, Serialize};

use super::monster::MonsterComposition;
use crate::domain::value_objects::{EncounterDifficulty, PuzzleLevel, XpThresholds};

/// Neutral balance score used when there is nothing to balance
pub const NEUTRAL_BALANCE_SCORE: f64 = 0.5;

/// Difficulty and balance of a combat encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterAnalysis {
    pub total_monsters: u32,
    pub total_base_xp: u32,
    pub multiplier: f64,
    pub adjusted_xp: f64,
    pub party_thresholds: XpThresholds,
    pub difficulty: EncounterDifficulty,
    pub balance_score: f64,
    pub recommendations: Vec<String>,
    pub monster_composition: MonsterComposition,
}

impl EncounterAnalysis {
    /// Placeholder for a scenario without combat
    pub fn no_combat(party_thresholds: XpThresholds) -> Self {
        Self {
            total_monsters: 0,
            total_base_xp: 0,
            multiplier: 1.0,
            adjusted_xp: 0.0,
            party_thresholds,
            difficulty: EncounterDifficulty::NoCombat,
            balance_score: NEUTRAL_BALANCE_SCORE,
            recommendations: Vec::new(),
            monster_composition: MonsterComposition::default(),
        }
    }
}

/// Surface metrics of a puzzle description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PuzzleMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub question_count: usize,
    pub avg_word_length: f64,
    pub complex_word_ratio: f64,
    pub lexical_diversity: f64,
    pub question_ratio: f64,
}

/// Complexity assessment of a puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleAnalysis {
    pub complexity_score: f64,
    pub level: PuzzleLevel,
    pub metrics: PuzzleMetrics,
    pub keyword_score: f64,
    pub structure_score: f64,
    pub solution_clarity: f64,
    pub recommendations: Vec<String>,
}

impl PuzzleAnalysis {
    /// Result for empty puzzle text
    pub fn no_puzzle() -> Self {
        Self {
            complexity_score: 0.0,
            level: PuzzleLevel::NoPuzzle,
            metrics: PuzzleMetrics::default(),
            keyword_score: 0.0,
            structure_score: 0.0,
            solution_clarity: 0.0,
            recommendations: Vec::new(),
        }
    }

    pub fn has_puzzle(&self) -> bool {
        self.level != PuzzleLevel::NoPuzzle
    }
}

/// Coherence, pacing and structure of the scenario prose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeAnalysis {
    pub narrative_score: f64,
    pub coherence_score: f64,
    pub pacing_score: f64,
    pub structure_score: f64,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub avg_paragraph_length: f64,
    pub transition_word_count: usize,
    pub recommendations: Vec<String>,
}

/// General statistics of a whole document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub unique_words: usize,
    pub lexical_diversity: f64,
}
