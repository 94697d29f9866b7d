//! Domain entities - Values produced by scenario analysis

mod analysis;
mod element;
mod monster;
mod report;
mod section;

pub use analysis::{
    EncounterAnalysis, NarrativeAnalysis, PuzzleAnalysis, PuzzleMetrics, TextMetrics,
    NEUTRAL_BALANCE_SCORE,
};
pub use element::{ExtractedElement, ExtractedElements, HEURISTIC_CONFIDENCE, TAGGED_CONFIDENCE};
pub use monster::{MonsterComposition, MonsterEntry, RatingCount};
pub use report::{MissingElement, ScenarioAnalysisReport};
pub use section::{SectionAnalysis, SectionType};
