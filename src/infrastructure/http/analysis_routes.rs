//! Scenario analysis API routes
//!
//! Full, quick and per-section analysis of scenario text.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::dto::{
    AnalysisResponseDto, AnalyzeScenarioRequestDto, QuickAnalysisRequestDto,
    SectionAnalysisRequestDto,
};
use crate::application::services::CreatureValidationService;
use crate::domain::entities::{ScenarioAnalysisReport, SectionAnalysis};
use crate::domain::errors::AnalysisError;
use crate::infrastructure::state::AppState;

/// Analyze a whole scenario, optionally cross-checking creature ratings
pub async fn analyze_scenario(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeScenarioRequestDto>,
) -> Result<Json<AnalysisResponseDto>, (StatusCode, String)> {
    let default_party = state.config.default_party;
    let party_level = req.party_level.unwrap_or(default_party.level());
    let party_size = req.party_size.unwrap_or(default_party.size());
    let text = req.text;

    let report = run_analysis(state.clone(), move |state| {
        state.scenario_analyzer.analyze(&text, party_level, party_size)
    })
    .await?;

    let creature_checks = if req.validate_creatures {
        state.creature_validation.cross_check(&report.monsters).await
    } else {
        Vec::new()
    };

    Ok(Json(AnalysisResponseDto::new(report, creature_checks)))
}

/// Analyze a scenario with the default party
pub async fn quick_analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuickAnalysisRequestDto>,
) -> Result<Json<AnalysisResponseDto>, (StatusCode, String)> {
    let report = run_analysis(state, move |state| {
        state.scenario_analyzer.quick_analyze(&req.text)
    })
    .await?;

    Ok(Json(AnalysisResponseDto::new(report, Vec::new())))
}

/// Analyze one section of a scenario
pub async fn analyze_section(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SectionAnalysisRequestDto>,
) -> Json<SectionAnalysis> {
    Json(
        state
            .section_analyzer
            .analyze_section(&req.text, &req.section_type),
    )
}

/// Run a CPU-bound analysis off the async workers
async fn run_analysis<F>(
    state: Arc<AppState>,
    analysis: F,
) -> Result<ScenarioAnalysisReport, (StatusCode, String)>
where
    F: FnOnce(&AppState) -> Result<ScenarioAnalysisReport, AnalysisError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || analysis(state.as_ref()))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}
