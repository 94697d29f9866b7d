use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MonsterEntry, ScenarioAnalysisReport};
use crate::domain::value_objects::{AnalysisId, CreatureRatingCheck, XpThresholds};

// ============================================================================
// Requests
// ============================================================================

/// Full analysis of a scenario document
#[derive(Debug, Deserialize)]
pub struct AnalyzeScenarioRequestDto {
    pub text: String,
    #[serde(default)]
    pub party_level: Option<u32>,
    #[serde(default)]
    pub party_size: Option<u32>,
    /// Cross-check monster ratings against the reference source
    #[serde(default)]
    pub validate_creatures: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuickAnalysisRequestDto {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SectionAnalysisRequestDto {
    pub text: String,
    pub section_type: String,
}

/// A creature as supplied directly by a caller
#[derive(Debug, Clone, Deserialize)]
pub struct MonsterInputDto {
    pub name: String,
    #[serde(default)]
    pub challenge_rating: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl From<MonsterInputDto> for MonsterEntry {
    fn from(value: MonsterInputDto) -> Self {
        MonsterEntry::new(value.name, value.challenge_rating, value.quantity)
    }
}

#[derive(Debug, Deserialize)]
pub struct EncounterDifficultyRequestDto {
    #[serde(default)]
    pub monsters: Vec<MonsterInputDto>,
    #[serde(default)]
    pub party_level: Option<u32>,
    #[serde(default)]
    pub party_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreatureValidationQuery {
    pub cr: f64,
}

// ============================================================================
// Responses
// ============================================================================

/// Envelope around a scenario report
#[derive(Debug, Serialize)]
pub struct AnalysisResponseDto {
    pub analysis_id: AnalysisId,
    pub analyzed_at: DateTime<Utc>,
    pub report: ScenarioAnalysisReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub creature_checks: Vec<CreatureRatingCheck>,
}

impl AnalysisResponseDto {
    pub fn new(report: ScenarioAnalysisReport, creature_checks: Vec<CreatureRatingCheck>) -> Self {
        Self {
            analysis_id: AnalysisId::new(),
            analyzed_at: Utc::now(),
            report,
            creature_checks,
        }
    }
}

/// Per-character thresholds for one level
#[derive(Debug, Serialize)]
pub struct XpThresholdsResponseDto {
    pub level: u32,
    /// Level whose table row was used, after clamping
    pub table_level: u32,
    pub thresholds: XpThresholds,
}
