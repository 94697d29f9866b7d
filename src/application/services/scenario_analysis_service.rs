//! Scenario Analysis Aggregator - full analysis of a scenario document
//!
//! Runs element extraction, monster extraction, encounter balance, puzzle
//! complexity and narrative flow, then merges their scores into one weighted
//! overall score with recommendations and a list of missing elements.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use super::element_extractor::ElementExtractor;
use super::encounter_balance::{party_thresholds, EncounterBalanceCalculator};
use super::monster_extractor::MonsterExtractor;
use crate::domain::entities::{
    EncounterAnalysis, ExtractedElements, MissingElement, NarrativeAnalysis, PuzzleAnalysis,
    ScenarioAnalysisReport,
};
use crate::domain::errors::AnalysisError;
use crate::domain::services::text_metrics::round_to;
use crate::domain::services::{calculate_text_metrics, NarrativeFlowScorer, PuzzleComplexityScorer};
use crate::domain::value_objects::{
    AnalysisWeights, ElementType, Importance, OverallWeights, PartyProfile,
};

/// Fewer distinct element types than this triggers a variety nudge
const MIN_CONTENT_TYPES: usize = 4;
/// NPC names that mark a merchant
const MERCHANT_MARKERS: [&str; 2] = ["торговец", "merchant"];

/// Input limits and defaults applied at the analysis entry points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    /// Longest accepted document, in characters
    pub max_text_length: usize,
    /// Shortest document accepted by the quick path, in characters
    pub quick_min_length: usize,
    pub default_party: PartyProfile,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            quick_min_length: 50,
            default_party: PartyProfile::default(),
        }
    }
}

/// Orchestrates the individual analyzers into one report
pub struct ScenarioAnalysisAggregator {
    element_extractor: ElementExtractor,
    monster_extractor: MonsterExtractor,
    encounter_calculator: Arc<EncounterBalanceCalculator>,
    puzzle_scorer: PuzzleComplexityScorer,
    narrative_scorer: NarrativeFlowScorer,
    weights: OverallWeights,
    settings: AnalysisSettings,
}

impl ScenarioAnalysisAggregator {
    pub fn new(
        element_extractor: ElementExtractor,
        encounter_calculator: Arc<EncounterBalanceCalculator>,
        weights: AnalysisWeights,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            element_extractor,
            monster_extractor: MonsterExtractor::new(),
            encounter_calculator,
            puzzle_scorer: PuzzleComplexityScorer::new(weights.puzzle),
            narrative_scorer: NarrativeFlowScorer::new(weights.narrative),
            weights: weights.overall,
            settings,
        }
    }

    /// Analyze a document for a party. Fails only on an empty party or an
    /// over-long document.
    pub fn analyze(
        &self,
        text: &str,
        party_level: u32,
        party_size: u32,
    ) -> Result<ScenarioAnalysisReport, AnalysisError> {
        let party = PartyProfile::new(party_level, party_size)?;
        self.analyze_for_party(text, party)
    }

    /// Analyze a document with the default party, rejecting very short text
    pub fn quick_analyze(&self, text: &str) -> Result<ScenarioAnalysisReport, AnalysisError> {
        let length = text.chars().count();
        if length < self.settings.quick_min_length {
            return Err(AnalysisError::InvalidArgument(format!(
                "scenario text must be at least {} characters, got {}",
                self.settings.quick_min_length, length
            )));
        }
        self.analyze_for_party(text, self.settings.default_party)
    }

    #[instrument(skip_all, fields(text_len = text.len(), level = party.level(), size = party.size()))]
    pub fn analyze_for_party(
        &self,
        text: &str,
        party: PartyProfile,
    ) -> Result<ScenarioAnalysisReport, AnalysisError> {
        let length = text.chars().count();
        if length > self.settings.max_text_length {
            return Err(AnalysisError::InvalidArgument(format!(
                "scenario text exceeds {} characters (got {})",
                self.settings.max_text_length, length
            )));
        }

        let started = Instant::now();

        let elements = self.element_extractor.extract(text);

        let monsters = self.monster_extractor.extract(text);
        let combat_analysis = if monsters.is_empty() {
            EncounterAnalysis::no_combat(party_thresholds(party))
        } else {
            self.encounter_calculator.calculate_difficulty(&monsters, party)
        };

        let puzzles = elements.get(ElementType::Puzzle);
        let puzzle_analysis = if puzzles.is_empty() {
            PuzzleAnalysis::no_puzzle()
        } else {
            let puzzle_text = puzzles
                .iter()
                .map(|p| p.raw_match.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            self.puzzle_scorer.analyze(&puzzle_text)
        };

        let narrative_analysis = self.narrative_scorer.analyze(text);

        let overall_score = round_to(
            self.weights.combat_balance * combat_analysis.balance_score
                + self.weights.puzzle_complexity * puzzle_analysis.complexity_score
                + self.weights.narrative * narrative_analysis.narrative_score,
            3,
        );

        let recommendations = overall_recommendations(
            &elements,
            &combat_analysis,
            &puzzle_analysis,
            &narrative_analysis,
        );
        let missing_elements = missing_elements(&elements);

        let report = ScenarioAnalysisReport {
            overall_score,
            execution_time_seconds: started.elapsed().as_secs_f64(),
            element_counts: elements.counts(),
            monsters,
            combat_analysis,
            puzzle_analysis,
            narrative_analysis,
            text_metrics: calculate_text_metrics(text),
            recommendations,
            missing_elements,
        };

        debug!(
            missing = report.missing_elements.len(),
            recommendations = report.recommendations.len(),
            "Scenario report assembled"
        );
        info!(
            overall_score = report.overall_score,
            elapsed_secs = report.execution_time_seconds,
            "Scenario analyzed"
        );
        Ok(report)
    }
}

/// Required elements the document lacks, plus a merchant when items are sold
pub fn missing_elements(elements: &ExtractedElements) -> Vec<MissingElement> {
    let mut missing: Vec<MissingElement> = [
        (ElementType::Npc, Importance::High),
        (ElementType::Location, Importance::Medium),
        (ElementType::Encounter, Importance::High),
    ]
    .into_iter()
    .filter(|(element_type, _)| !elements.contains(*element_type))
    .map(|(element_type, importance)| MissingElement {
        element_type,
        display_name: element_type.display_name().to_string(),
        importance,
        reason: None,
    })
    .collect();

    if elements.contains(ElementType::Item) {
        let has_merchant = elements.get(ElementType::Npc).iter().any(|npc| {
            let name = npc.name.to_lowercase();
            MERCHANT_MARKERS.iter().any(|marker| name.contains(marker))
        });
        if !has_merchant {
            missing.push(MissingElement {
                element_type: ElementType::Npc,
                display_name: "Торговец/Продавец".to_string(),
                importance: Importance::Medium,
                reason: Some("Для продажи/покупки предметов".to_string()),
            });
        }
    }

    missing
}

fn overall_recommendations(
    elements: &ExtractedElements,
    combat: &EncounterAnalysis,
    puzzle: &PuzzleAnalysis,
    narrative: &NarrativeAnalysis,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if elements.count(ElementType::Npc) < 2 {
        recommendations.push("Добавьте больше NPC для социальных взаимодействий".to_string());
    }
    if elements.count(ElementType::Location) < 2 {
        recommendations.push("Добавьте разнообразные локации для исследования".to_string());
    }

    if combat.difficulty.is_undertuned() {
        recommendations.push("Можно усилить боевые встречи для большего вызова".to_string());
    } else if combat.difficulty.is_overtuned() {
        recommendations.push("Боевые встречи могут быть слишком сложными".to_string());
    }

    if !puzzle.has_puzzle() {
        recommendations.push("Добавьте загадки или головоломки для разнообразия".to_string());
    } else if puzzle.complexity_score < 0.3 {
        recommendations.push("Загадки слишком простые - усложните их".to_string());
    } else if puzzle.complexity_score > 0.7 {
        recommendations.push("Загадки могут быть слишком сложными - добавьте подсказки".to_string());
    }

    if narrative.narrative_score < 0.4 {
        recommendations.push("Улучшите связность повествования".to_string());
    }

    if elements.distinct_types() < MIN_CONTENT_TYPES {
        recommendations
            .push("Добавьте больше типов контента (предметы, ловушки, сокровища)".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EncounterDifficulty;
    use crate::infrastructure::memo_cache::InMemoryMemoCache;

    fn aggregator() -> ScenarioAnalysisAggregator {
        ScenarioAnalysisAggregator::new(
            ElementExtractor::new(Arc::new(InMemoryMemoCache::new())),
            Arc::new(EncounterBalanceCalculator::new(Arc::new(InMemoryMemoCache::new()))),
            AnalysisWeights::default(),
            AnalysisSettings::default(),
        )
    }

    const GOBLIN_AMBUSH: &str = "[NPC: Гвендолин] [LOC: Тёмный лес] [ENCOUNTER: Засада] \
        [MONSTER: Гоблин x3 CR 1/4]\n\n\
        Путники идут по старой дороге, и проводница ведёт их всё глубже в чащу. \
        Затем из кустов выскакивают враги.\n\n\
        [NPC: Гвендолин] [LOC: Тёмный лес] [ENCOUNTER: Засада] [MONSTER: Гоблин x3 CR 1/4]";

    #[test]
    fn test_goblin_ambush_end_to_end() {
        let report = aggregator().analyze(GOBLIN_AMBUSH, 3, 4).unwrap();

        assert!(report.element_counts[&ElementType::Npc] >= 1);
        assert!(report.element_counts[&ElementType::Location] >= 1);
        assert!(report.element_counts[&ElementType::Encounter] >= 1);

        assert_eq!(report.monsters.len(), 1);
        assert_eq!(report.monsters[0].name, "Гоблин");
        assert_eq!(report.monsters[0].challenge_rating, 0.25);
        assert_eq!(report.monsters[0].quantity, 3);

        let combat = &report.combat_analysis;
        assert_eq!(combat.total_base_xp, 150);
        assert_eq!(combat.multiplier, 2.0);
        assert_eq!(combat.adjusted_xp, 300.0);
        assert_eq!(combat.party_thresholds.easy, 300);
        assert_eq!(combat.party_thresholds.medium, 600);
        assert_eq!(combat.party_thresholds.hard, 900);
        assert_eq!(combat.party_thresholds.deadly, 1600);
        assert_eq!(combat.difficulty, EncounterDifficulty::Easy);

        assert!(!report.puzzle_analysis.has_puzzle());
        assert!(report
            .recommendations
            .contains(&"Можно усилить боевые встречи для большего вызова".to_string()));
        assert!((0.0..=1.0).contains(&report.overall_score));
    }

    #[test]
    fn test_huge_monster_counts_do_not_overflow() {
        let text = "[MONSTER: Гоблин x4000000000 CR 1/4] [MONSTER: Орк x4000000000 CR 1/2]";
        let report = aggregator().analyze(text, 3, 4).unwrap();

        assert_eq!(report.monsters.len(), 2);
        let combat = &report.combat_analysis;
        assert_eq!(combat.total_monsters, u32::MAX);
        assert_eq!(combat.monster_composition.total_count, u32::MAX);
        assert_eq!(combat.difficulty, EncounterDifficulty::Lethal);
        assert!((0.0..=1.0).contains(&report.overall_score));
    }

    #[test]
    fn test_huge_party_does_not_overflow() {
        let report = aggregator().analyze("Пустой текст", 20, 1_000_000).unwrap();
        let thresholds = &report.combat_analysis.party_thresholds;
        assert_eq!(thresholds.easy, 2_800_000_000);
        assert_eq!(thresholds.deadly, u32::MAX);
        assert!((0.0..=1.0).contains(&report.overall_score));
    }

    #[test]
    fn test_short_text_degrades_to_neutral_scores() {
        let report = aggregator().analyze("Пустой текст", 3, 4).unwrap();

        assert!(report.monsters.is_empty());
        assert_eq!(report.combat_analysis.difficulty, EncounterDifficulty::NoCombat);
        assert_eq!(report.combat_analysis.balance_score, 0.5);
        assert_eq!(report.puzzle_analysis.complexity_score, 0.0);
        assert_eq!(report.narrative_analysis.coherence_score, 0.5);
        assert_eq!(report.missing_elements.len(), 3);
        assert!(report.missing_elements[0].importance == Importance::High);
        assert!((0.0..=1.0).contains(&report.overall_score));
    }

    #[test]
    fn test_empty_party_is_rejected() {
        let result = aggregator().analyze(GOBLIN_AMBUSH, 3, 0);
        assert!(matches!(result, Err(AnalysisError::InvalidArgument(_))));
    }

    #[test]
    fn test_overlong_text_is_rejected() {
        let aggregator = ScenarioAnalysisAggregator::new(
            ElementExtractor::new(Arc::new(InMemoryMemoCache::new())),
            Arc::new(EncounterBalanceCalculator::new(Arc::new(InMemoryMemoCache::new()))),
            AnalysisWeights::default(),
            AnalysisSettings {
                max_text_length: 10,
                ..AnalysisSettings::default()
            },
        );
        assert!(aggregator.analyze("Слишком длинный сценарий", 3, 4).is_err());
    }

    #[test]
    fn test_quick_analysis_requires_minimum_length() {
        let aggregator = aggregator();
        assert!(matches!(
            aggregator.quick_analyze("Пустой текст"),
            Err(AnalysisError::InvalidArgument(_))
        ));
        let report = aggregator.quick_analyze(GOBLIN_AMBUSH).unwrap();
        assert_eq!(report.combat_analysis.party_thresholds.easy, 300);
    }

    #[test]
    fn test_items_without_merchant() {
        let extractor = ElementExtractor::new(Arc::new(InMemoryMemoCache::new()));
        let elements = extractor.extract("[ITEM: Меч героя] [NPC: Старый Торговец] [LOC: Рынок]");
        assert!(missing_elements(&elements)
            .iter()
            .all(|m| m.reason.is_none()));

        let elements = extractor.extract("[ITEM: Меч героя] [NPC: Кузнец] [LOC: Рынок]");
        let missing = missing_elements(&elements);
        let merchant = missing.iter().find(|m| m.reason.is_some()).unwrap();
        assert_eq!(merchant.display_name, "Торговец/Продавец");
        assert_eq!(merchant.importance, Importance::Medium);
        assert_eq!(merchant.element_type, ElementType::Npc);
    }

    #[test]
    fn test_overall_score_uses_weights() {
        let report = aggregator().analyze("Пустой текст", 3, 4).unwrap();
        let expected = round_to(
            0.4 * report.combat_analysis.balance_score
                + 0.3 * report.puzzle_analysis.complexity_score
                + 0.3 * report.narrative_analysis.narrative_score,
            3,
        );
        assert_eq!(report.overall_score, expected);
    }
}
