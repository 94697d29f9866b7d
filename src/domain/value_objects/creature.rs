//! Canonical creature ratings and rating cross-checks

use serde::{Deserialize, Serialize};

/// Challenge rating assumed for a creature the reference source does not know
pub const UNKNOWN_CREATURE_RATING: f64 = 0.5;
/// XP assumed for a creature the reference source does not know
pub const UNKNOWN_CREATURE_XP: u32 = 100;
/// Ratings closer than this to the canonical value are accepted
pub const RATING_TOLERANCE: f64 = 0.25;

/// Result of looking a creature up in a reference source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureLookup {
    pub name: String,
    pub challenge_rating: f64,
    pub xp: u32,
    pub found: bool,
}

impl CreatureLookup {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            challenge_rating: UNKNOWN_CREATURE_RATING,
            xp: UNKNOWN_CREATURE_XP,
            found: false,
        }
    }
}

/// Advisory comparison of a declared rating against the canonical one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRatingCheck {
    pub creature_name: String,
    pub valid: bool,
    pub message: String,
    pub claimed_cr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_cr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CreatureRatingCheck {
    /// Compare a claimed rating with a lookup result
    pub fn evaluate(creature_name: &str, claimed_cr: f64, lookup: &CreatureLookup) -> Self {
        if !lookup.found {
            return Self {
                creature_name: creature_name.to_string(),
                valid: false,
                message: "Монстр не найден в базе D&D 5e".to_string(),
                claimed_cr,
                canonical_cr: None,
                suggestion: None,
            };
        }

        let canonical = lookup.challenge_rating;
        if (canonical - claimed_cr).abs() < RATING_TOLERANCE {
            Self {
                creature_name: creature_name.to_string(),
                valid: true,
                message: "CR соответствует D&D 5e SRD".to_string(),
                claimed_cr,
                canonical_cr: Some(canonical),
                suggestion: None,
            }
        } else {
            Self {
                creature_name: creature_name.to_string(),
                valid: false,
                message: format!(
                    "CR отличается от D&D 5e SRD ({} vs {})",
                    canonical, claimed_cr
                ),
                claimed_cr,
                canonical_cr: Some(canonical),
                suggestion: Some(format!("Используйте CR {} для баланса", canonical)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(cr: f64) -> CreatureLookup {
        CreatureLookup {
            name: "Goblin".to_string(),
            challenge_rating: cr,
            xp: 50,
            found: true,
        }
    }

    #[test]
    fn test_matching_rating_is_valid() {
        let check = CreatureRatingCheck::evaluate("Goblin", 0.25, &found(0.25));
        assert!(check.valid);
        assert_eq!(check.canonical_cr, Some(0.25));
        assert!(check.suggestion.is_none());
    }

    #[test]
    fn test_mismatched_rating_suggests_canonical() {
        let check = CreatureRatingCheck::evaluate("Goblin", 2.0, &found(0.25));
        assert!(!check.valid);
        assert_eq!(check.suggestion.as_deref(), Some("Используйте CR 0.25 для баланса"));
    }

    #[test]
    fn test_unknown_creature_is_not_valid() {
        let check = CreatureRatingCheck::evaluate("Шмыг", 1.0, &CreatureLookup::not_found("Шмыг"));
        assert!(!check.valid);
        assert!(check.canonical_cr.is_none());
    }
}
