//! Analysis of a single scenario section

use serde::{Deserialize, Serialize};

use super::analysis::{EncounterAnalysis, PuzzleAnalysis};
use super::monster::MonsterEntry;

/// Kind of section an author asks to analyze in isolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Combat,
    Puzzle,
    Dialogue,
    Description,
}

impl std::str::FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combat" => Ok(Self::Combat),
            "puzzle" => Ok(Self::Puzzle),
            "dialogue" => Ok(Self::Dialogue),
            "description" => Ok(Self::Description),
            other => Err(other.to_string()),
        }
    }
}

/// Result of analyzing one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionAnalysis {
    Combat {
        monster_count: usize,
        monsters: Vec<MonsterEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        analysis: Option<EncounterAnalysis>,
    },
    Puzzle {
        analysis: PuzzleAnalysis,
    },
    Dialogue {
        line_count: usize,
        speaker_count: usize,
        avg_line_length: f64,
    },
    Description {
        word_count: usize,
        sentence_count: usize,
        descriptive_word_ratio: f64,
    },
    /// The requested section type is not supported
    Unknown {
        section_type: String,
        error: String,
    },
}
