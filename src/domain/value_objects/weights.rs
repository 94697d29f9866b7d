//! Tunable scoring weights and breakpoints
//!
//! Every constant that shapes a composite score lives here so hosts can tune
//! the analyzers without touching scoring code.

use serde::{Deserialize, Serialize};

/// Weights of the three sub-scores in the overall scenario score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallWeights {
    pub combat_balance: f64,
    pub puzzle_complexity: f64,
    pub narrative: f64,
}

/// Weights of the puzzle complexity composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PuzzleWeights {
    pub lexical_diversity: f64,
    pub keywords: f64,
    pub structure: f64,
    /// Applied to `1 - solution_clarity`
    pub obscurity: f64,
    /// Ascending score breakpoints between the five puzzle levels
    pub level_breakpoints: [f64; 4],
}

/// Weights of the narrative flow composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrativeWeights {
    pub coherence: f64,
    pub pacing: f64,
    pub structure: f64,
}

/// All scoring weights used by the scenario analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWeights {
    pub overall: OverallWeights,
    pub puzzle: PuzzleWeights,
    pub narrative: NarrativeWeights,
}

impl Default for AnalysisWeights {
    fn default() -> Self {
        Self {
            overall: OverallWeights {
                combat_balance: 0.4,
                puzzle_complexity: 0.3,
                narrative: 0.3,
            },
            puzzle: PuzzleWeights {
                lexical_diversity: 0.3,
                keywords: 0.3,
                structure: 0.2,
                obscurity: 0.2,
                level_breakpoints: [0.25, 0.45, 0.65, 0.85],
            },
            narrative: NarrativeWeights {
                coherence: 0.4,
                pacing: 0.3,
                structure: 0.3,
            },
        }
    }
}

impl AnalysisWeights {
    /// Load the top-level weights from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            overall: OverallWeights {
                combat_balance: env_or(
                    "SCENARIO_WEIGHT_COMBAT",
                    defaults.overall.combat_balance,
                ),
                puzzle_complexity: env_or(
                    "SCENARIO_WEIGHT_PUZZLE",
                    defaults.overall.puzzle_complexity,
                ),
                narrative: env_or("SCENARIO_WEIGHT_NARRATIVE", defaults.overall.narrative),
            },
            narrative: NarrativeWeights {
                coherence: env_or(
                    "SCENARIO_WEIGHT_NARRATIVE_COHERENCE",
                    defaults.narrative.coherence,
                ),
                pacing: env_or("SCENARIO_WEIGHT_NARRATIVE_PACING", defaults.narrative.pacing),
                structure: env_or(
                    "SCENARIO_WEIGHT_NARRATIVE_STRUCTURE",
                    defaults.narrative.structure,
                ),
            },
            ..defaults
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
