//! Difficulty tiers and importance levels reported by the analyzers

use serde::{Deserialize, Serialize};

/// Encounter difficulty relative to the party's XP thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterDifficulty {
    Easy,
    Medium,
    Hard,
    Deadly,
    Lethal,
    /// The scenario contains no recognizable combat
    NoCombat,
}

impl EncounterDifficulty {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "Легкая",
            Self::Medium => "Средняя",
            Self::Hard => "Сложная",
            Self::Deadly => "Опасная",
            Self::Lethal => "Смертельная",
            Self::NoCombat => "Нет боев",
        }
    }

    pub fn is_undertuned(&self) -> bool {
        matches!(self, Self::Easy | Self::Medium)
    }

    pub fn is_overtuned(&self) -> bool {
        matches!(self, Self::Deadly | Self::Lethal)
    }
}

/// Puzzle complexity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleLevel {
    /// No puzzle text was supplied
    NoPuzzle,
    VeryEasy,
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl PuzzleLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NoPuzzle => "Нет загадки",
            Self::VeryEasy => "Очень простой",
            Self::Easy => "Простой",
            Self::Medium => "Средний",
            Self::Hard => "Сложный",
            Self::VeryHard => "Очень сложный",
        }
    }

    /// Bucket a complexity score using four ascending breakpoints
    pub fn from_score(score: f64, breakpoints: &[f64; 4]) -> Self {
        if score < breakpoints[0] {
            Self::VeryEasy
        } else if score < breakpoints[1] {
            Self::Easy
        } else if score < breakpoints[2] {
            Self::Medium
        } else if score < breakpoints[3] {
            Self::Hard
        } else {
            Self::VeryHard
        }
    }
}

/// How important a missing element is for a playable scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
}
