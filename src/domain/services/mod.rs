//! Domain services - Pure scoring logic with no I/O

pub mod narrative_flow;
pub mod puzzle_complexity;
pub mod text_metrics;

pub use narrative_flow::NarrativeFlowScorer;
pub use puzzle_complexity::PuzzleComplexityScorer;
pub use text_metrics::calculate_text_metrics;
