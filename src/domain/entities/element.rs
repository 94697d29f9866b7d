//! Elements extracted from scenario prose

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ElementType;

/// Confidence of an element written with explicit bracket markup
pub const TAGGED_CONFIDENCE: f64 = 0.8;
/// Confidence of an element guessed from natural-language phrasing
pub const HEURISTIC_CONFIDENCE: f64 = 0.5;

/// A named element found in scenario text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedElement {
    pub element_type: ElementType,
    pub name: String,
    /// Character offset of the match start
    pub start_pos: usize,
    /// Character offset one past the match end
    pub end_pos: usize,
    pub raw_match: String,
    pub confidence: f64,
}

/// Elements of a document grouped by type.
///
/// Only types with at least one element have an entry. Within a type elements
/// keep the order in which the extraction rules produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedElements {
    by_type: BTreeMap<ElementType, Vec<ExtractedElement>>,
}

impl ExtractedElements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element unless one with the same name and start already exists for its type
    pub fn push_unique(&mut self, element: ExtractedElement) -> bool {
        let elements = self.by_type.entry(element.element_type).or_default();
        let duplicate = elements
            .iter()
            .any(|e| e.name == element.name && e.start_pos == element.start_pos);
        if duplicate {
            return false;
        }
        elements.push(element);
        true
    }

    pub fn get(&self, element_type: ElementType) -> &[ExtractedElement] {
        self.by_type
            .get(&element_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, element_type: ElementType) -> usize {
        self.get(element_type).len()
    }

    pub fn contains(&self, element_type: ElementType) -> bool {
        self.count(element_type) > 0
    }

    /// Number of element types with at least one element
    pub fn distinct_types(&self) -> usize {
        self.by_type.values().filter(|v| !v.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct_types() == 0
    }

    pub fn counts(&self) -> BTreeMap<ElementType, usize> {
        self.by_type
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(t, v)| (*t, v.len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementType, &Vec<ExtractedElement>)> {
        self.by_type.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc(name: &str, start_pos: usize) -> ExtractedElement {
        ExtractedElement {
            element_type: ElementType::Npc,
            name: name.to_string(),
            start_pos,
            end_pos: start_pos + name.len(),
            raw_match: name.to_string(),
            confidence: HEURISTIC_CONFIDENCE,
        }
    }

    #[test]
    fn test_push_unique_deduplicates_by_name_and_start() {
        let mut elements = ExtractedElements::new();
        assert!(elements.push_unique(npc("Гвендолин", 5)));
        assert!(!elements.push_unique(npc("Гвендолин", 5)));
        assert!(elements.push_unique(npc("Гвендолин", 40)));
        assert_eq!(elements.count(ElementType::Npc), 2);
        assert_eq!(elements.distinct_types(), 1);
    }

    #[test]
    fn test_counts_skip_missing_types() {
        let elements = ExtractedElements::new();
        assert!(elements.counts().is_empty());
        assert!(elements.get(ElementType::Location).is_empty());
    }
}
