//! Monster extraction - a creature-specific pass over scenario text
//!
//! Runs independently of element extraction, so creatures are found even
//! without an `[ENCOUNTER: ...]` tag. Recognized forms:
//! - `[MONSTER: Гоблин x3 CR 1/4]`
//! - `Гоблины (x3, CR 1/4)`
//! - `3 гоблина (CR 0.25)`, or `3 гоблина` for known creatures

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, instrument};

use crate::domain::entities::MonsterEntry;
use crate::domain::value_objects::UNKNOWN_CREATURE_RATING;

/// Well-known creatures and their challenge ratings, matched by substring
const KNOWN_CREATURES: [(&str, f64); 25] = [
    ("гоблин", 0.25),
    ("goblin", 0.25),
    ("орк", 0.5),
    ("ork", 0.5),
    ("orc", 0.5),
    ("волк", 0.25),
    ("wolf", 0.25),
    ("медведь", 2.0),
    ("bear", 2.0),
    ("тролль", 5.0),
    ("troll", 5.0),
    ("дракон", 10.0),
    ("dragon", 10.0),
    ("зомби", 0.25),
    ("zombie", 0.25),
    ("скелет", 0.25),
    ("skeleton", 0.25),
    ("вампир", 13.0),
    ("vampire", 13.0),
    ("демон", 8.0),
    ("demon", 8.0),
    ("дьявол", 6.0),
    ("devil", 6.0),
    ("элементаль", 5.0),
    ("elemental", 5.0),
];

/// Which capture group holds each field
struct MonsterPattern {
    pattern: Regex,
    name_group: usize,
    quantity_group: usize,
    rating_group: usize,
    /// Accept a match only when it carries an explicit quantity or rating
    requires_annotation: bool,
    /// Accept an unannotated match only when it names a known creature
    requires_known_creature: bool,
}

static MONSTER_PATTERNS: Lazy<Vec<MonsterPattern>> = Lazy::new(|| {
    vec![
        MonsterPattern {
            pattern: Regex::new(
                r"(?i)\[MONSTER:\s*([^\]]+?)\s*(?:x\s*(\d+))?\s*(?:CR\s*([\d/.]+))?\]",
            )
            .unwrap(),
            name_group: 1,
            quantity_group: 2,
            rating_group: 3,
            requires_annotation: false,
            requires_known_creature: false,
        },
        MonsterPattern {
            pattern: Regex::new(
                r"([A-ZА-ЯЁ][a-zа-яё]+)\s*\(\s*(?:[xXхХ]\s*(\d+))?\s*,?\s*(?:(?i:CR)\s*([\d/.]+))?\s*\)",
            )
            .unwrap(),
            name_group: 1,
            quantity_group: 2,
            rating_group: 3,
            requires_annotation: true,
            requires_known_creature: false,
        },
        MonsterPattern {
            pattern: Regex::new(r"(?i)\b(\d+)\s+([a-zа-яё]+)(?:\s*\(\s*CR\s*([\d/.]+)\s*\))?")
                .unwrap(),
            name_group: 2,
            quantity_group: 1,
            rating_group: 3,
            requires_annotation: false,
            requires_known_creature: true,
        },
    ]
});

/// Finds creatures and their challenge ratings in free text
#[derive(Debug, Clone, Copy, Default)]
pub struct MonsterExtractor;

impl MonsterExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract monsters, deduplicated by (name, rating) keeping the first match
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn extract(&self, text: &str) -> Vec<MonsterEntry> {
        let mut monsters = Vec::new();
        let mut seen = HashSet::new();

        for monster_pattern in MONSTER_PATTERNS.iter() {
            for captures in monster_pattern.pattern.captures_iter(text) {
                let Some(entry) = parse_match(monster_pattern, &captures) else {
                    continue;
                };
                if seen.insert(entry.dedup_key()) {
                    monsters.push(entry);
                }
            }
        }

        debug!(monsters = monsters.len(), "Extracted monsters");
        monsters
    }
}

fn parse_match(monster_pattern: &MonsterPattern, captures: &Captures<'_>) -> Option<MonsterEntry> {
    let name = captures
        .get(monster_pattern.name_group)?
        .as_str()
        .trim()
        .to_lowercase();
    if name.is_empty() {
        return None;
    }

    let quantity = captures
        .get(monster_pattern.quantity_group)
        .map(|m| m.as_str());
    let rating = captures
        .get(monster_pattern.rating_group)
        .map(|m| m.as_str());

    if monster_pattern.requires_annotation && quantity.is_none() && rating.is_none() {
        return None;
    }
    let known_rating = known_creature_rating(&name);
    if monster_pattern.requires_known_creature && rating.is_none() && known_rating.is_none() {
        return None;
    }

    let challenge_rating = rating
        .and_then(parse_rating)
        .or(known_rating)
        .unwrap_or(UNKNOWN_CREATURE_RATING);
    let quantity = quantity.and_then(|q| q.parse::<u32>().ok()).unwrap_or(1);
    let source = captures.get(0).map(|m| m.as_str()).unwrap_or_default();

    Some(MonsterEntry::new(title_case(&name), challenge_rating, quantity).with_source(source))
}

/// Parse `1/4`, `0.5` or `2`. Anything else, including a zero denominator, is `None`.
pub fn parse_rating(text: &str) -> Option<f64> {
    let rating = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => text.parse().ok()?,
    };
    (rating.is_finite() && rating >= 0.0).then_some(rating)
}

/// Rating of the first known creature whose name occurs in `name`
pub fn known_creature_rating(name: &str) -> Option<f64> {
    let lower = name.to_lowercase();
    KNOWN_CREATURES
        .iter()
        .find(|(known, _)| lower.contains(known))
        .map(|(_, rating)| *rating)
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
