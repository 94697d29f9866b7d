//! Domain layer - Scenario analysis model and pure scoring logic
//!
//! This layer contains:
//! - Entities: extracted elements, monsters, analysis results and the report
//! - Value Objects: element types, difficulty tiers, XP tables, scoring weights
//! - Domain Services: puzzle and narrative scorers, text metrics
//! - Errors: boundary errors raised for caller contract violations

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
