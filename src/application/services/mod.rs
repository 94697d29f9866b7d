//! Application services - Use case implementations
//!
//! Services receive their caches and external capabilities through the
//! outbound ports, so hosts decide cache lifetime and network access.

pub mod creature_validation_service;
pub mod element_extractor;
pub mod encounter_balance;
pub mod monster_extractor;
pub mod scenario_analysis_service;
pub mod section_analysis_service;

pub use creature_validation_service::{CreatureValidationService, CreatureValidationServiceImpl};
pub use element_extractor::ElementExtractor;
pub use encounter_balance::EncounterBalanceCalculator;
pub use monster_extractor::MonsterExtractor;
pub use scenario_analysis_service::{AnalysisSettings, ScenarioAnalysisAggregator};
pub use section_analysis_service::SectionAnalysisService;
