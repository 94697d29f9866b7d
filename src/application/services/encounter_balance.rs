//! Encounter Balance Calculator - D&D 5e encounter difficulty
//!
//! Sums creature XP, applies the monster-count multiplier and compares the
//! adjusted total against the party's XP thresholds. Malformed input degrades
//! to defaults instead of failing.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::outbound::MemoCachePort;
use crate::domain::entities::{EncounterAnalysis, MonsterComposition, MonsterEntry, RatingCount};
use crate::domain::services::text_metrics::round_to;
use crate::domain::value_objects::xp_tables::{
    multiplier_for_count, thresholds_for_level, xp_for_rating,
};
use crate::domain::value_objects::{EncounterDifficulty, PartyProfile, XpThresholds};

/// Encounters with more creatures than this slow the table down
const CROWDED_ENCOUNTER: u32 = 6;

/// Computes encounter difficulty against a party, memoizing per input
pub struct EncounterBalanceCalculator {
    cache: Arc<dyn MemoCachePort<EncounterAnalysis>>,
}

impl EncounterBalanceCalculator {
    pub fn new(cache: Arc<dyn MemoCachePort<EncounterAnalysis>>) -> Self {
        Self { cache }
    }

    #[instrument(skip_all, fields(monsters = monsters.len(), level = party.level(), size = party.size()))]
    pub fn calculate_difficulty(
        &self,
        monsters: &[MonsterEntry],
        party: PartyProfile,
    ) -> EncounterAnalysis {
        let key = cache_key(monsters, party);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Encounter analysis cache hit");
            return cached;
        }

        let analysis = Self::calculate_uncached(monsters, party);
        debug!(
            adjusted_xp = analysis.adjusted_xp,
            difficulty = ?analysis.difficulty,
            balance_score = analysis.balance_score,
            "Calculated encounter difficulty"
        );
        self.cache.put(key, analysis.clone());
        analysis
    }

    pub fn calculate_uncached(monsters: &[MonsterEntry], party: PartyProfile) -> EncounterAnalysis {
        let mut total_base_xp = 0u32;
        let mut total_monsters = 0u32;
        for monster in monsters {
            total_base_xp =
                total_base_xp.saturating_add(xp_for_rating(monster.challenge_rating).saturating_mul(monster.quantity));
            total_monsters = total_monsters.saturating_add(monster.quantity);
        }

        let multiplier = multiplier_for_count(total_monsters);
        let adjusted_xp = f64::from(total_base_xp) * multiplier;
        let party_thresholds = party_thresholds(party);
        let difficulty = determine_difficulty(adjusted_xp, &party_thresholds);
        let composition = analyze_composition(monsters);

        EncounterAnalysis {
            total_monsters,
            total_base_xp,
            multiplier,
            adjusted_xp,
            party_thresholds,
            difficulty,
            balance_score: round_to(balance_score(adjusted_xp, &party_thresholds), 3),
            recommendations: recommendations(total_monsters, difficulty, &composition),
            monster_composition: composition,
        }
    }
}

/// Exact textual key over every input that influences the result
fn cache_key(monsters: &[MonsterEntry], party: PartyProfile) -> String {
    let mut key = String::new();
    for monster in monsters {
        let _ = write!(
            key,
            "{}:{}:{};",
            monster.name, monster.challenge_rating, monster.quantity
        );
    }
    let _ = write!(key, "{}_{}", party.level(), party.size());
    key
}

/// Whole-party thresholds. Levels outside the table clamp to level 20.
pub fn party_thresholds(party: PartyProfile) -> XpThresholds {
    thresholds_for_level(party.level()).scaled(party.size())
}

/// First threshold the adjusted XP does not exceed
pub fn determine_difficulty(adjusted_xp: f64, thresholds: &XpThresholds) -> EncounterDifficulty {
    if adjusted_xp <= f64::from(thresholds.easy) {
        EncounterDifficulty::Easy
    } else if adjusted_xp <= f64::from(thresholds.medium) {
        EncounterDifficulty::Medium
    } else if adjusted_xp <= f64::from(thresholds.hard) {
        EncounterDifficulty::Hard
    } else if adjusted_xp <= f64::from(thresholds.deadly) {
        EncounterDifficulty::Deadly
    } else {
        EncounterDifficulty::Lethal
    }
}

/// Balance in [0, 1], exactly 0.5 inside the ideal band [0.8 x medium, 1.2 x hard].
///
/// The bands are tested in a fixed order: ideal, below easy, above deadly,
/// then the easy-medium and medium-deadly interpolations. The ideal band
/// overlaps the interpolation bands and wins where they meet.
pub fn balance_score(adjusted_xp: f64, thresholds: &XpThresholds) -> f64 {
    let easy = f64::from(thresholds.easy);
    let medium = f64::from(thresholds.medium);
    let hard = f64::from(thresholds.hard);
    let deadly = f64::from(thresholds.deadly);

    let ideal_min = medium * 0.8;
    let ideal_max = hard * 1.2;

    if (ideal_min..=ideal_max).contains(&adjusted_xp) {
        0.5
    } else if adjusted_xp < easy {
        let distance = (easy - adjusted_xp) / easy;
        (0.5 - distance * 0.5).max(0.0)
    } else if adjusted_xp > deadly {
        let distance = (adjusted_xp - deadly) / deadly;
        (0.5 - (distance * 0.5).min(0.5)).max(0.0)
    } else if adjusted_xp < medium {
        let position = (adjusted_xp - easy) / (medium - easy);
        0.25 + position * 0.25
    } else {
        let position = (adjusted_xp - medium) / (deadly - medium);
        0.5 + position * 0.25
    }
}

/// Rating statistics over every individual creature
pub fn analyze_composition(monsters: &[MonsterEntry]) -> MonsterComposition {
    let mut distribution: BTreeMap<u64, (f64, u32)> = BTreeMap::new();
    let mut total_count = 0u32;
    let mut rating_sum = 0.0;
    let mut min_cr = f64::INFINITY;
    let mut max_cr = f64::NEG_INFINITY;

    for monster in monsters {
        let rating = monster.challenge_rating;
        // Ratings are finite and non-negative, so bit order is numeric order
        let slot = distribution.entry(rating.to_bits()).or_insert((rating, 0));
        slot.1 = slot.1.saturating_add(monster.quantity);
        total_count = total_count.saturating_add(monster.quantity);
        rating_sum += rating * f64::from(monster.quantity);
        min_cr = min_cr.min(rating);
        max_cr = max_cr.max(rating);
    }

    if total_count == 0 {
        return MonsterComposition::default();
    }

    let total = f64::from(total_count);
    MonsterComposition {
        total_count,
        avg_cr: round_to(rating_sum / total, 2),
        diversity_score: round_to(distribution.len() as f64 / total, 3),
        cr_distribution: distribution
            .into_values()
            .map(|(challenge_rating, count)| RatingCount {
                challenge_rating,
                count,
            })
            .collect(),
        min_cr,
        max_cr,
    }
}

fn recommendations(
    total_monsters: u32,
    difficulty: EncounterDifficulty,
    composition: &MonsterComposition,
) -> Vec<String> {
    if total_monsters == 0 {
        return vec!["Добавьте боевую встречу для более динамичного геймплея".to_string()];
    }

    let mut recommendations = Vec::new();
    if total_monsters == 1 {
        recommendations.push("Одинокий монстр может быть быстро убит - добавьте поддержку".to_string());
    } else if total_monsters > CROWDED_ENCOUNTER {
        recommendations.push(
            "Слишком много монстров - игра может замедлиться, объедините некоторых".to_string(),
        );
    }

    if difficulty.is_undertuned() {
        recommendations.push("Можно усилить встречу для большего вызова".to_string());
    } else if difficulty.is_overtuned() {
        recommendations.push("Встреча может быть слишком сложной для группы".to_string());
    }

    let unique_ratings: HashSet<u64> = composition
        .cr_distribution
        .iter()
        .map(|entry| entry.challenge_rating.to_bits())
        .collect();
    if unique_ratings.len() == 1 && total_monsters > 3 {
        recommendations
            .push("Добавьте монстров разного CR для тактического разнообразия".to_string());
    }

    if composition.max_cr <= 1.0 && total_monsters > 2 {
        recommendations.push("Добавьте сильного монстра-лидера для тактической глубины".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memo_cache::InMemoryMemoCache;

    fn party(level: u32, size: u32) -> PartyProfile {
        PartyProfile::new(level, size).unwrap()
    }

    fn calculator() -> EncounterBalanceCalculator {
        EncounterBalanceCalculator::new(Arc::new(InMemoryMemoCache::new()))
    }

    #[test]
    fn test_goblin_ambush_is_easy() {
        let goblins = [MonsterEntry::new("Гоблин", 0.25, 3)];
        let analysis = calculator().calculate_difficulty(&goblins, party(3, 4));

        assert_eq!(analysis.total_monsters, 3);
        assert_eq!(analysis.total_base_xp, 150);
        assert_eq!(analysis.multiplier, 2.0);
        assert_eq!(analysis.adjusted_xp, 300.0);
        assert_eq!(analysis.party_thresholds.easy, 300);
        assert_eq!(analysis.party_thresholds.deadly, 1600);
        assert_eq!(analysis.difficulty, EncounterDifficulty::Easy);
        assert_eq!(analysis.balance_score, 0.25);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("монстра-лидера")));
    }

    #[test]
    fn test_empty_encounter_suggests_combat() {
        let analysis = calculator().calculate_difficulty(&[], party(3, 4));
        assert_eq!(analysis.total_monsters, 0);
        assert_eq!(analysis.adjusted_xp, 0.0);
        assert_eq!(analysis.monster_composition, MonsterComposition::default());
        assert_eq!(
            analysis.recommendations,
            vec!["Добавьте боевую встречу для более динамичного геймплея".to_string()]
        );
    }

    #[test]
    fn test_multiplier_follows_total_quantity() {
        for (quantity, expected) in [(1, 1.0), (2, 1.5), (3, 2.0), (7, 2.5), (11, 3.0), (15, 4.0)] {
            let monsters = [MonsterEntry::new("Волк", 0.25, quantity)];
            let analysis = EncounterBalanceCalculator::calculate_uncached(&monsters, party(5, 4));
            assert_eq!(analysis.multiplier, expected, "quantity {quantity}");
        }
    }

    #[test]
    fn test_ideal_band_is_exactly_neutral() {
        let thresholds = party_thresholds(party(3, 4));
        for xp in [500.0, 600.0, 900.0, 1000.0] {
            assert_eq!(balance_score(xp, &thresholds), 0.5, "xp {xp}");
        }
    }

    #[test]
    fn test_interpolation_bands() {
        let thresholds = party_thresholds(party(3, 4));
        // easy 300, medium 600: halfway between
        assert_eq!(balance_score(450.0, &thresholds), 0.375);
        // medium 600, deadly 1600, above the ideal band
        assert_eq!(balance_score(1100.0, &thresholds), 0.625);
        assert!((balance_score(1300.0, &thresholds) - 0.675).abs() < 1e-9);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let monsters = [
            MonsterEntry::new("Гоблин", 0.25, 4_000_000_000),
            MonsterEntry::new("Орк", 0.5, 4_000_000_000),
        ];
        let composition = analyze_composition(&monsters);
        assert_eq!(composition.total_count, u32::MAX);
        assert_eq!(composition.cr_distribution.len(), 2);
        assert!(composition.avg_cr.is_finite());

        let analysis = EncounterBalanceCalculator::calculate_uncached(&monsters, party(3, 4));
        assert_eq!(analysis.total_monsters, u32::MAX);
        assert_eq!(analysis.difficulty, EncounterDifficulty::Lethal);
    }

    #[test]
    fn test_huge_party_thresholds_saturate() {
        let thresholds = party_thresholds(party(20, 1_000_000));
        assert_eq!(thresholds.easy, 2_800_000_000);
        assert_eq!(thresholds.medium, u32::MAX);
        assert_eq!(thresholds.deadly, u32::MAX);

        let monsters = [MonsterEntry::new("Гоблин", 0.25, 3)];
        let analysis = EncounterBalanceCalculator::calculate_uncached(&monsters, party(20, 1_000_000));
        assert_eq!(analysis.difficulty, EncounterDifficulty::Easy);
        assert!((0.0..=1.0).contains(&analysis.balance_score));
    }

    #[test]
    fn test_balance_tails() {
        let thresholds = party_thresholds(party(3, 4));
        assert_eq!(balance_score(0.0, &thresholds), 0.0);
        assert_eq!(balance_score(150.0, &thresholds), 0.25);
        assert_eq!(balance_score(3200.0, &thresholds), 0.0);
        assert_eq!(balance_score(10_000.0, &thresholds), 0.0);
        // Between 1.2 x hard and deadly
        assert_eq!(balance_score(1600.0, &thresholds), 0.75);
    }

    #[test]
    fn test_difficulty_tiers_are_inclusive() {
        let thresholds = party_thresholds(party(3, 4));
        assert_eq!(determine_difficulty(300.0, &thresholds), EncounterDifficulty::Easy);
        assert_eq!(determine_difficulty(301.0, &thresholds), EncounterDifficulty::Medium);
        assert_eq!(determine_difficulty(900.0, &thresholds), EncounterDifficulty::Hard);
        assert_eq!(determine_difficulty(1600.0, &thresholds), EncounterDifficulty::Deadly);
        assert_eq!(determine_difficulty(1601.0, &thresholds), EncounterDifficulty::Lethal);
    }

    #[test]
    fn test_out_of_range_level_uses_level_twenty() {
        let analysis = EncounterBalanceCalculator::calculate_uncached(&[], party(42, 1));
        assert_eq!(analysis.party_thresholds.deadly, 12_700);
    }

    #[test]
    fn test_unknown_rating_is_worth_nothing() {
        let monsters = [MonsterEntry::new("Шмыг", 0.3, 2)];
        let analysis = EncounterBalanceCalculator::calculate_uncached(&monsters, party(3, 4));
        assert_eq!(analysis.total_base_xp, 0);
        assert_eq!(analysis.total_monsters, 2);
    }

    #[test]
    fn test_composition() {
        let monsters = [
            MonsterEntry::new("Гоблин", 0.25, 3),
            MonsterEntry::new("Тролль", 5.0, 1),
        ];
        let composition = analyze_composition(&monsters);
        assert_eq!(composition.total_count, 4);
        assert_eq!(composition.avg_cr, 1.44);
        assert_eq!(composition.diversity_score, 0.5);
        assert_eq!(composition.min_cr, 0.25);
        assert_eq!(composition.max_cr, 5.0);
        assert_eq!(
            composition.cr_distribution,
            vec![
                RatingCount { challenge_rating: 0.25, count: 3 },
                RatingCount { challenge_rating: 5.0, count: 1 },
            ]
        );
    }

    #[test]
    fn test_crowded_uniform_encounter() {
        let monsters = [MonsterEntry::new("Зомби", 0.25, 8)];
        let analysis = EncounterBalanceCalculator::calculate_uncached(&monsters, party(1, 4));
        let recommendations = analysis.recommendations.join("\n");
        assert!(recommendations.contains("Слишком много монстров"));
        assert!(recommendations.contains("разного CR"));
        assert!(recommendations.contains("монстра-лидера"));
    }

    #[test]
    fn test_lone_monster() {
        let monsters = [MonsterEntry::new("Дракон", 10.0, 1)];
        let analysis = EncounterBalanceCalculator::calculate_uncached(&monsters, party(3, 4));
        assert_eq!(analysis.difficulty, EncounterDifficulty::Lethal);
        assert!(analysis.recommendations[0].starts_with("Одинокий монстр"));
        assert!(analysis.recommendations[1].contains("слишком сложной"));
    }

    #[test]
    fn test_cached_result_matches_fresh_result() {
        let calculator = calculator();
        let goblins = [MonsterEntry::new("Гоблин", 0.25, 3)];
        let first = calculator.calculate_difficulty(&goblins, party(3, 4));
        let second = calculator.calculate_difficulty(&goblins, party(3, 4));
        assert_eq!(first, second);
        assert_ne!(first, calculator.calculate_difficulty(&goblins, party(3, 5)));
    }
}
