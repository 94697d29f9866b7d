//! Puzzle complexity scoring
//!
//! Scores a block of puzzle text on four axes and combines them with
//! [`PuzzleWeights`]:
//! - lexical diversity (unique words / words)
//! - difficulty keywords, weighted by tier
//! - sentence structure (length, length variance, questions)
//! - how clearly the text gives the solution away (inverted)

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::text_metrics::{round_to, split_terminated_sentences, variance, words};
use crate::domain::entities::{PuzzleAnalysis, PuzzleMetrics};
use crate::domain::value_objects::{PuzzleLevel, PuzzleWeights};

/// Keyword tiers with their weight
const COMPLEXITY_KEYWORDS: [(f64, &[&str]); 4] = [
    (0.25, &["простой", "легкий", "очевидный", "прямой", "ясный"]),
    (0.5, &["средний", "умеренный", "логичный", "стандартный", "типичный"]),
    (0.75, &["сложный", "трудный", "запутанный", "хитрый", "замысловатый"]),
    (1.0, &["экспертный", "головоломный", "загадочный", "неочевидный", "скрытый"]),
];

const SOLUTION_PHRASES: [&str; 4] = ["решение", "ответ", "ключ", "разгадка"];
const HINT_PHRASES: [&str; 4] = ["подсказка", "намёк", "улика", "след"];

/// Words longer than this count as complex
const COMPLEX_WORD_LENGTH: usize = 7;

/// Solution/hint patterns, most specific first, with their clarity weight
static SOLUTION_PATTERNS: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)(?:решение|ответ|ключ)[:\s]+([^.]+)").unwrap(), 0.8),
        (
            Regex::new(r"(?i)(?:чтобы решить|для решения)[^.]+?([^.]+)").unwrap(),
            0.6,
        ),
        (Regex::new(r"(?i)(?:подсказка|намёк)[:\s]+([^.]+)").unwrap(), 0.4),
    ]
});

/// Scores the complexity of puzzle descriptions
#[derive(Debug, Clone)]
pub struct PuzzleComplexityScorer {
    weights: PuzzleWeights,
}

impl PuzzleComplexityScorer {
    pub fn new(weights: PuzzleWeights) -> Self {
        Self { weights }
    }

    /// Analyze a puzzle. Blank text yields the "no puzzle" result.
    pub fn analyze(&self, puzzle_text: &str) -> PuzzleAnalysis {
        if puzzle_text.trim().is_empty() {
            return PuzzleAnalysis::no_puzzle();
        }

        let metrics = calculate_puzzle_metrics(puzzle_text);
        let keyword_score = keyword_score(puzzle_text);
        let structure_score = structure_score(puzzle_text);
        let solution_clarity = solution_clarity(puzzle_text);

        let w = &self.weights;
        let complexity_score = metrics.lexical_diversity * w.lexical_diversity
            + keyword_score * w.keywords
            + structure_score * w.structure
            + (1.0 - solution_clarity) * w.obscurity;

        let level = PuzzleLevel::from_score(complexity_score, &w.level_breakpoints);
        let recommendations = recommendations(complexity_score, &metrics, solution_clarity);

        debug!(
            complexity_score,
            keyword_score,
            structure_score,
            solution_clarity,
            "Scored puzzle"
        );

        PuzzleAnalysis {
            complexity_score: round_to(complexity_score, 3),
            level,
            metrics,
            keyword_score: round_to(keyword_score, 3),
            structure_score: round_to(structure_score, 3),
            solution_clarity: round_to(solution_clarity, 3),
            recommendations,
        }
    }
}

impl Default for PuzzleComplexityScorer {
    fn default() -> Self {
        Self::new(crate::domain::value_objects::AnalysisWeights::default().puzzle)
    }
}

fn calculate_puzzle_metrics(text: &str) -> PuzzleMetrics {
    let words = words(text);
    let sentences = split_terminated_sentences(text);
    let question_count = sentences.iter().filter(|s| s.contains('?')).count();
    let word_count = words.len();
    let divisor = word_count.max(1) as f64;

    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let complex_words = words
        .iter()
        .filter(|w| w.chars().count() > COMPLEX_WORD_LENGTH)
        .count();
    let unique_words = words.iter().collect::<HashSet<_>>().len();

    PuzzleMetrics {
        word_count,
        sentence_count: sentences.len(),
        question_count,
        avg_word_length: total_chars as f64 / divisor,
        complex_word_ratio: complex_words as f64 / divisor,
        lexical_diversity: unique_words as f64 / divisor,
        question_ratio: question_count as f64 / sentences.len().max(1) as f64,
    }
}

fn keyword_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let total: f64 = COMPLEXITY_KEYWORDS
        .iter()
        .map(|(weight, keywords)| {
            let matches = keywords.iter().filter(|k| lower.contains(*k)).count();
            matches as f64 * weight
        })
        .sum();
    (total / 10.0).min(1.0)
}

fn structure_score(text: &str) -> f64 {
    let sentences = split_terminated_sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let avg_length = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let length_variance = if lengths.len() > 1 {
        variance(&lengths)
    } else {
        0.0
    };
    let question_bonus = if sentences.iter().any(|s| s.ends_with('?')) {
        1.0
    } else {
        0.5
    };

    let score = (avg_length / 20.0).min(1.0) * 0.4
        + (length_variance / 50.0).min(1.0) * 0.3
        + question_bonus * 0.3;
    score.min(1.0)
}

fn solution_clarity(text: &str) -> f64 {
    let lower = text.to_lowercase();

    let has_solution_mention = SOLUTION_PHRASES.iter().any(|p| lower.contains(p));
    let pattern_score = SOLUTION_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(&lower))
        .map(|(_, weight)| *weight)
        .fold(0.0, f64::max);
    let has_hints = HINT_PHRASES.iter().any(|h| lower.contains(h));

    let mention_score = if has_solution_mention { 1.0 } else { 0.3 };
    let hint_score = if has_hints { 0.8 } else { 0.2 };

    (mention_score * 0.4 + pattern_score * 0.4 + hint_score * 0.2).min(1.0)
}

fn recommendations(
    complexity_score: f64,
    metrics: &PuzzleMetrics,
    solution_clarity: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if complexity_score < 0.3 {
        recommendations
            .push("Загадка слишком простая - добавьте больше деталей или усложните логику".to_string());
    } else if complexity_score > 0.8 {
        recommendations.push("Загадка может быть слишком сложной - добавьте подсказки".to_string());
    }

    if metrics.word_count < 50 {
        recommendations.push("Загадка слишком короткая - раскройте детали".to_string());
    } else if metrics.word_count > 300 {
        recommendations.push("Загадка слишком длинная - упростите описание".to_string());
    }

    if metrics.question_ratio < 0.1 {
        recommendations.push("Добавьте наводящие вопросы для вовлечения игроков".to_string());
    }

    if solution_clarity < 0.3 {
        recommendations.push("Решение неочевидно - добавьте больше подсказок".to_string());
    } else if solution_clarity > 0.8 {
        recommendations.push("Решение слишком очевидно - сделайте его более загадочным".to_string());
    }

    recommendations
}
