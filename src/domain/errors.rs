//! Errors raised at the analysis boundary
//!
//! The scorers themselves never fail; only caller contract violations surface here.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
