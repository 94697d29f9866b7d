//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::CreatureLookupPort;
use crate::application::services::{
    CreatureValidationServiceImpl, ElementExtractor, EncounterBalanceCalculator,
    ScenarioAnalysisAggregator, SectionAnalysisService,
};
use crate::domain::services::PuzzleComplexityScorer;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dnd5e_api::{Dnd5eApiClient, DisabledCreatureLookup};
use crate::infrastructure::memo_cache::InMemoryMemoCache;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub scenario_analyzer: ScenarioAnalysisAggregator,
    pub section_analyzer: SectionAnalysisService,
    pub encounter_calculator: Arc<EncounterBalanceCalculator>,
    pub creature_validation: CreatureValidationServiceImpl,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let lookup: Arc<dyn CreatureLookupPort> = if config.dnd_api_enabled {
            Arc::new(
                Dnd5eApiClient::new(&config.dnd_api_url, config.dnd_api_timeout)
                    .context("Failed to build D&D 5e API client")?,
            )
        } else {
            Arc::new(DisabledCreatureLookup)
        };
        Ok(Self::with_lookup(config, lookup))
    }

    /// Build the state around a given creature lookup
    pub fn with_lookup(config: AppConfig, lookup: Arc<dyn CreatureLookupPort>) -> Self {
        let encounter_calculator = Arc::new(EncounterBalanceCalculator::new(Arc::new(
            InMemoryMemoCache::new(),
        )));
        let element_extractor = ElementExtractor::new(Arc::new(InMemoryMemoCache::new()));

        let scenario_analyzer = ScenarioAnalysisAggregator::new(
            element_extractor,
            encounter_calculator.clone(),
            config.weights,
            config.analysis_settings(),
        );
        let section_analyzer = SectionAnalysisService::new(
            encounter_calculator.clone(),
            PuzzleComplexityScorer::new(config.weights.puzzle),
        );
        let creature_validation =
            CreatureValidationServiceImpl::new(lookup, Arc::new(InMemoryMemoCache::new()))
                .with_timeout(config.dnd_api_timeout);

        Self {
            config,
            scenario_analyzer,
            section_analyzer,
            encounter_calculator,
            creature_validation,
        }
    }
}
