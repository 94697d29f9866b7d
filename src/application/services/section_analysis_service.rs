//! Section analysis - analyze one part of a scenario in isolation

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use super::encounter_balance::EncounterBalanceCalculator;
use super::monster_extractor::MonsterExtractor;
use crate::domain::entities::{SectionAnalysis, SectionType};
use crate::domain::services::text_metrics::{terminator_piece_count, words};
use crate::domain::services::PuzzleComplexityScorer;
use crate::domain::value_objects::PartyProfile;

/// Combat sections are judged against a mid-tier table
const SECTION_PARTY_LEVEL: u32 = 5;
const SECTION_PARTY_SIZE: u32 = 4;

/// Endings of Russian adjectives and adverbs
const DESCRIPTIVE_SUFFIXES: [&str; 13] = [
    "ый", "ой", "ий", "ая", "яя", "ое", "ее", "о", "е", "и", "но", "то", "во",
];

static SPEAKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+):").unwrap());

pub struct SectionAnalysisService {
    monster_extractor: MonsterExtractor,
    encounter_calculator: Arc<EncounterBalanceCalculator>,
    puzzle_scorer: PuzzleComplexityScorer,
}

impl SectionAnalysisService {
    pub fn new(
        encounter_calculator: Arc<EncounterBalanceCalculator>,
        puzzle_scorer: PuzzleComplexityScorer,
    ) -> Self {
        Self {
            monster_extractor: MonsterExtractor::new(),
            encounter_calculator,
            puzzle_scorer,
        }
    }

    /// Analyze `text` as a section of the named type. Unknown types produce an
    /// [`SectionAnalysis::Unknown`] marker instead of an error.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn analyze_section(&self, text: &str, section_type: &str) -> SectionAnalysis {
        let Ok(parsed) = section_type.parse::<SectionType>() else {
            debug!("Unknown section type requested");
            return SectionAnalysis::Unknown {
                section_type: section_type.to_string(),
                error: "Unknown section type".to_string(),
            };
        };

        match parsed {
            SectionType::Combat => self.combat(text),
            SectionType::Puzzle => SectionAnalysis::Puzzle {
                analysis: self.puzzle_scorer.analyze(text),
            },
            SectionType::Dialogue => dialogue(text),
            SectionType::Description => description(text),
        }
    }

    fn combat(&self, text: &str) -> SectionAnalysis {
        let monsters = self.monster_extractor.extract(text);
        let analysis = if monsters.is_empty() {
            None
        } else {
            let party = PartyProfile::new(SECTION_PARTY_LEVEL, SECTION_PARTY_SIZE)
                .unwrap_or_default();
            Some(self.encounter_calculator.calculate_difficulty(&monsters, party))
        };
        SectionAnalysis::Combat {
            monster_count: monsters.len(),
            monsters,
            analysis,
        }
    }
}

fn dialogue(text: &str) -> SectionAnalysis {
    let line_count = text.matches('\n').count() + 1;
    let speakers: HashSet<&str> = SPEAKER_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    SectionAnalysis::Dialogue {
        line_count,
        speaker_count: speakers.len(),
        avg_line_length: text.chars().count() as f64 / line_count as f64,
    }
}

fn description(text: &str) -> SectionAnalysis {
    let words = words(text);
    SectionAnalysis::Description {
        word_count: words.len(),
        sentence_count: terminator_piece_count(text),
        descriptive_word_ratio: descriptive_word_ratio(&words),
    }
}

/// Share of words with an adjective or adverb ending
fn descriptive_word_ratio(words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let descriptive = words
        .iter()
        .filter(|word| {
            let lower = word.to_lowercase();
            DESCRIPTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        })
        .count();
    descriptive as f64 / words.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EncounterDifficulty;
    use crate::infrastructure::memo_cache::InMemoryMemoCache;

    fn service() -> SectionAnalysisService {
        SectionAnalysisService::new(
            Arc::new(EncounterBalanceCalculator::new(Arc::new(InMemoryMemoCache::new()))),
            PuzzleComplexityScorer::default(),
        )
    }

    #[test]
    fn test_combat_section_uses_level_five_party() {
        let result = service().analyze_section("[MONSTER: Орк x4 CR 1/2]", "combat");
        let SectionAnalysis::Combat {
            monster_count,
            analysis: Some(analysis),
            ..
        } = result
        else {
            panic!("expected a combat analysis");
        };
        assert_eq!(monster_count, 1);
        assert_eq!(analysis.party_thresholds.easy, 1000);
        // 4 x 100 XP x 2.0
        assert_eq!(analysis.adjusted_xp, 800.0);
        assert_eq!(analysis.difficulty, EncounterDifficulty::Easy);
    }

    #[test]
    fn test_combat_section_without_monsters() {
        let result = service().analyze_section("Тишина.", "Combat");
        assert_eq!(
            result,
            SectionAnalysis::Combat {
                monster_count: 0,
                monsters: Vec::new(),
                analysis: None,
            }
        );
    }

    #[test]
    fn test_dialogue_section() {
        let text = "Мирон: Добро пожаловать!\nОльга: Нам нужна комната.\nМирон: Конечно.";
        let SectionAnalysis::Dialogue {
            line_count,
            speaker_count,
            avg_line_length,
        } = service().analyze_section(text, "dialogue")
        else {
            panic!("expected a dialogue analysis");
        };
        assert_eq!(line_count, 3);
        assert_eq!(speaker_count, 2);
        assert_eq!(avg_line_length, text.chars().count() as f64 / 3.0);
    }

    #[test]
    fn test_description_section() {
        let text = "Тёмный лес. Старый дуб стоит тихо.";
        let SectionAnalysis::Description {
            word_count,
            sentence_count,
            descriptive_word_ratio,
        } = service().analyze_section(text, "description")
        else {
            panic!("expected a description analysis");
        };
        assert_eq!(word_count, 6);
        // the trailing empty piece after the last period is counted
        assert_eq!(sentence_count, 3);
        // punctuation stays attached to "тихо."
        assert_eq!(descriptive_word_ratio, 2.0 / 6.0);
    }

    #[test]
    fn test_puzzle_section() {
        let result = service().analyze_section("", "puzzle");
        assert!(matches!(
            result,
            SectionAnalysis::Puzzle { analysis } if !analysis.has_puzzle()
        ));
    }

    #[test]
    fn test_unknown_section_type_is_a_marker() {
        assert_eq!(
            service().analyze_section("текст", "poetry"),
            SectionAnalysis::Unknown {
                section_type: "poetry".to_string(),
                error: "Unknown section type".to_string(),
            }
        );
    }
}
