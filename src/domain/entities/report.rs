//! Aggregated scenario report

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::analysis::{EncounterAnalysis, NarrativeAnalysis, PuzzleAnalysis, TextMetrics};
use super::monster::MonsterEntry;
use crate::domain::value_objects::{ElementType, Importance};

/// A required or expected element the scenario lacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingElement {
    pub element_type: ElementType,
    pub display_name: String,
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Full analysis of a scenario document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysisReport {
    pub overall_score: f64,
    pub execution_time_seconds: f64,
    pub element_counts: BTreeMap<ElementType, usize>,
    pub monsters: Vec<MonsterEntry>,
    pub combat_analysis: EncounterAnalysis,
    pub puzzle_analysis: PuzzleAnalysis,
    pub narrative_analysis: NarrativeAnalysis,
    pub text_metrics: TextMetrics,
    pub recommendations: Vec<String>,
    pub missing_elements: Vec<MissingElement>,
}
