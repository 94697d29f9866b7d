//! Scenario Forge Engine - Rule-based analysis of TTRPG scenario documents
//!
//! Scores a free-form scenario along four axes:
//! - structural elements (NPCs, locations, items, encounters, puzzles)
//! - combat balance against the D&D 5e XP budget of a party
//! - puzzle complexity
//! - narrative coherence, pacing and structure
//!
//! and merges them into one report with recommendations.

pub mod application;
pub mod domain;
pub mod infrastructure;
