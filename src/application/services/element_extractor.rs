//! Element extraction - rule-based detection of named scenario elements
//!
//! Every element type has an ordered list of patterns. The bracket-tag form
//! (`[NPC: Гвендолин]`) always comes first, natural-language heuristics after
//! it. Rules run in that fixed order and all matches of one rule are emitted
//! before any match of the next, so within a type a bracket tag found late in
//! the text is still listed before an earlier heuristic match.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::application::ports::outbound::MemoCachePort;
use crate::domain::entities::{
    ExtractedElement, ExtractedElements, HEURISTIC_CONFIDENCE, TAGGED_CONFIDENCE,
};
use crate::domain::value_objects::ElementType;

/// Capitalized word sequence, e.g. "Тёмный Лес"
const PROPER_NAME: &str = r"([A-ZА-ЯЁ][a-zа-яё]+(?:\s+[A-ZА-ЯЁ][a-zа-яё]+)*)";
/// A single lowercase word
const PLAIN_WORD: &str = r"([a-zа-яё]+)";

/// One extraction rule. Lower priority values run first within a type.
struct ExtractionRule {
    element_type: ElementType,
    priority: u8,
    pattern: Regex,
}

impl ExtractionRule {
    fn new(element_type: ElementType, priority: u8, pattern: &str) -> Self {
        Self {
            element_type,
            priority,
            pattern: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        }
    }

    fn tagged(element_type: ElementType) -> Self {
        Self::new(
            element_type,
            0,
            &format!(r"\[{}:\s*([^\]]+)\]", element_type.tag()),
        )
    }
}

/// Natural-language heuristics per element type, in priority order
fn heuristic_patterns(element_type: ElementType) -> Vec<String> {
    match element_type {
        ElementType::Npc => vec![
            format!(r"(?:NPC|персонаж)[:\s]+{}", PROPER_NAME),
            format!(r"(?:имя|зовут|называется)[:\s]+{}", PROPER_NAME),
        ],
        ElementType::Location => vec![
            format!(r"(?:локация|место|город|деревня|пещера)[:\s]+{}", PROPER_NAME),
            format!(r"в\s+{}", PROPER_NAME),
        ],
        ElementType::Item => vec![
            format!(r"(?:предмет|артефакт|оружие|доспех)[:\s]+{}", PROPER_NAME),
            format!(r"(?:магический|волшебный)\s+{}", PLAIN_WORD),
        ],
        ElementType::Encounter => vec![
            format!(r"(?:встреча|бой|сражение)[:\s]+{}", PROPER_NAME),
            format!(r"(?:против|противник|враг)[:\s]+{}", PROPER_NAME),
        ],
        ElementType::Puzzle => vec![
            format!(r"(?:загадка|головоломка|тайна)[:\s]+{}", PROPER_NAME),
            format!(r"(?:решить|разгадать|открыть)[:\s]+{}", PLAIN_WORD),
        ],
        // Tag-only types
        ElementType::Trap
        | ElementType::Treasure
        | ElementType::Clue
        | ElementType::Event
        | ElementType::Dialogue => Vec::new(),
    }
}

static EXTRACTION_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    let mut rules = Vec::new();
    for element_type in ElementType::ALL {
        rules.push(ExtractionRule::tagged(element_type));
        for (i, pattern) in heuristic_patterns(element_type).iter().enumerate() {
            rules.push(ExtractionRule::new(element_type, i as u8 + 1, pattern));
        }
    }
    // Stable sort keeps type order and makes the per-type priority explicit
    rules.sort_by_key(|r| (r.element_type, r.priority));
    rules
});

/// Maps byte offsets of a text to character offsets
struct CharOffsets {
    char_starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            char_starts: text.char_indices().map(|(i, _)| i).collect(),
        }
    }

    fn char_index(&self, byte_offset: usize) -> usize {
        self.char_starts.partition_point(|&b| b < byte_offset)
    }
}

/// Extracts structured elements from scenario text, memoizing per exact text
pub struct ElementExtractor {
    cache: Arc<dyn MemoCachePort<ExtractedElements>>,
}

impl ElementExtractor {
    pub fn new(cache: Arc<dyn MemoCachePort<ExtractedElements>>) -> Self {
        Self { cache }
    }

    /// Extract all elements. Never fails; empty text yields no elements.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn extract(&self, text: &str) -> ExtractedElements {
        if let Some(cached) = self.cache.get(text) {
            debug!("Element extraction cache hit");
            return cached;
        }

        let elements = Self::extract_uncached(text);
        debug!(
            element_types = elements.distinct_types(),
            "Extracted scenario elements"
        );
        self.cache.put(text.to_string(), elements.clone());
        elements
    }

    /// Run every extraction rule against the text without consulting the cache
    pub fn extract_uncached(text: &str) -> ExtractedElements {
        let offsets = CharOffsets::new(text);
        let mut elements = ExtractedElements::new();

        for rule in EXTRACTION_RULES.iter() {
            for captures in rule.pattern.captures_iter(text) {
                let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                    continue;
                };
                let name = name.as_str().trim();
                if name.chars().count() <= 1 {
                    continue;
                }

                let raw_match = whole.as_str();
                elements.push_unique(ExtractedElement {
                    element_type: rule.element_type,
                    name: name.to_string(),
                    start_pos: offsets.char_index(whole.start()),
                    end_pos: offsets.char_index(whole.end()),
                    raw_match: raw_match.to_string(),
                    confidence: if raw_match.contains('[') {
                        TAGGED_CONFIDENCE
                    } else {
                        HEURISTIC_CONFIDENCE
                    },
                });
            }
        }

        elements
    }
}
