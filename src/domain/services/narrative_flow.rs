//! Narrative flow scoring: coherence, pacing and plot structure of a document

use std::collections::HashSet;

use tracing::debug;

use super::text_metrics::{round_to, split_sentences, variance};
use crate::domain::entities::NarrativeAnalysis;
use crate::domain::value_objects::NarrativeWeights;

const TRANSITION_WORDS: [&str; 14] = [
    "затем",
    "потом",
    "после этого",
    "вдруг",
    "внезапно",
    "однако",
    "но",
    "тем не менее",
    "следовательно",
    "поэтому",
    "таким образом",
    "кроме того",
    "более того",
    "в то же время",
];

const PLOT_ELEMENTS: [&str; 8] = [
    "завязка",
    "развитие",
    "кульминация",
    "развязка",
    "конфликт",
    "разрешение",
    "поворот",
    "открытие",
];

const INTRODUCTION_WORDS: [&str; 3] = ["введение", "начало", "пролог"];
const CONCLUSION_WORDS: [&str; 3] = ["заключение", "конец", "эпилог"];

/// Characters inspected at each end of the text for intro/conclusion markers
const FRAME_WINDOW: usize = 200;
/// Words compared at each side of a paragraph boundary
const BOUNDARY_WORDS: usize = 3;

const NEUTRAL_SCORE: f64 = 0.5;

/// Scores how well a scenario reads as a story
#[derive(Debug, Clone)]
pub struct NarrativeFlowScorer {
    weights: NarrativeWeights,
}

impl NarrativeFlowScorer {
    pub fn new(weights: NarrativeWeights) -> Self {
        Self { weights }
    }

    pub fn analyze(&self, text: &str) -> NarrativeAnalysis {
        let paragraphs = split_paragraphs(text);
        let sentences = split_sentences(text);

        let coherence_score = coherence_score(&paragraphs, &sentences);
        let pacing_score = pacing_score(&paragraphs);
        let structure_score = structure_score(text);
        let transition_word_count = count_transition_words(text);

        let w = &self.weights;
        let narrative_score =
            coherence_score * w.coherence + pacing_score * w.pacing + structure_score * w.structure;

        let total_words: usize = paragraphs
            .iter()
            .map(|p| p.split_whitespace().count())
            .sum();

        debug!(
            paragraphs = paragraphs.len(),
            sentences = sentences.len(),
            narrative_score,
            "Scored narrative flow"
        );

        NarrativeAnalysis {
            narrative_score: round_to(narrative_score, 3),
            coherence_score: round_to(coherence_score, 3),
            pacing_score: round_to(pacing_score, 3),
            structure_score: round_to(structure_score, 3),
            paragraph_count: paragraphs.len(),
            sentence_count: sentences.len(),
            avg_paragraph_length: total_words as f64 / paragraphs.len().max(1) as f64,
            transition_word_count,
            recommendations: recommendations(
                narrative_score,
                paragraphs.len(),
                sentences.len(),
                transition_word_count,
            ),
        }
    }
}

impl Default for NarrativeFlowScorer {
    fn default() -> Self {
        Self::new(crate::domain::value_objects::AnalysisWeights::default().narrative)
    }
}

/// Paragraphs separated by blank lines
fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn coherence_score(paragraphs: &[&str], sentences: &[String]) -> f64 {
    if paragraphs.len() < 2 || sentences.len() < 4 {
        return NEUTRAL_SCORE;
    }

    let coherent_pairs = paragraphs
        .windows(2)
        .filter(|pair| {
            let prev: Vec<&str> = pair[0].split_whitespace().collect();
            let next: Vec<&str> = pair[1].split_whitespace().collect();
            let tail: HashSet<&str> = prev[prev.len().saturating_sub(BOUNDARY_WORDS)..]
                .iter()
                .copied()
                .collect();
            next.iter().take(BOUNDARY_WORDS).any(|w| tail.contains(w))
        })
        .count();
    let paragraph_score = coherent_pairs as f64 / (paragraphs.len() - 1) as f64;

    let transition_count: usize = sentences
        .iter()
        .map(|sentence| {
            let lower = sentence.to_lowercase();
            TRANSITION_WORDS
                .iter()
                .filter(|t| lower.contains(*t))
                .count()
        })
        .sum();
    let transition_score = (transition_count as f64 / sentences.len() as f64).min(1.0);

    paragraph_score * 0.6 + transition_score * 0.4
}

fn pacing_score(paragraphs: &[&str]) -> f64 {
    if paragraphs.len() < 3 {
        return NEUTRAL_SCORE;
    }

    let lengths: Vec<f64> = paragraphs
        .iter()
        .map(|p| p.split_whitespace().count() as f64)
        .collect();

    match variance(&lengths) {
        // monotonous
        v if v < 50.0 => 0.4,
        v if v < 200.0 => 0.8,
        // erratic
        _ => 0.5,
    }
}

fn structure_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let char_count = lower.chars().count();

    let plot_element_count = PLOT_ELEMENTS.iter().filter(|e| lower.contains(*e)).count();

    let head: String = lower.chars().take(FRAME_WINDOW).collect();
    let tail: String = lower
        .chars()
        .skip(char_count.saturating_sub(FRAME_WINDOW))
        .collect();
    let has_introduction = INTRODUCTION_WORDS.iter().any(|w| head.contains(w));
    let has_conclusion = CONCLUSION_WORDS.iter().any(|w| tail.contains(w));

    (plot_element_count as f64 / 4.0).min(1.0) * 0.4
        + if has_introduction { 0.3 } else { 0.15 }
        + if has_conclusion { 0.3 } else { 0.15 }
}

/// Non-overlapping occurrences of every transition word in the whole text
fn count_transition_words(text: &str) -> usize {
    let lower = text.to_lowercase();
    TRANSITION_WORDS
        .iter()
        .map(|word| lower.matches(word).count())
        .sum()
}

fn recommendations(
    narrative_score: f64,
    paragraph_count: usize,
    sentence_count: usize,
    transition_word_count: usize,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if narrative_score < 0.4 {
        recommendations.push("Повествование требует улучшения связности".to_string());
    }

    if paragraph_count < 3 {
        recommendations.push("Добавьте больше параграфов для структурирования текста".to_string());
    } else if paragraph_count > 20 {
        recommendations.push("Слишком много коротких параграфов - объедините некоторые".to_string());
    }

    if sentence_count < 10 {
        recommendations.push("Добавьте деталей и описаний".to_string());
    }

    if transition_word_count == 0 {
        recommendations.push("Используйте больше слов-переходов для связности".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence_uses_neutral_coherence() {
        let analysis = NarrativeFlowScorer::default().analyze("Герои входят в таверну.");
        assert_eq!(analysis.paragraph_count, 1);
        assert_eq!(analysis.sentence_count, 1);
        assert_eq!(analysis.coherence_score, 0.5);
        assert_eq!(analysis.pacing_score, 0.5);
    }

    #[test]
    fn test_empty_text_does_not_divide_by_zero() {
        let analysis = NarrativeFlowScorer::default().analyze("");
        assert_eq!(analysis.paragraph_count, 0);
        assert_eq!(analysis.avg_paragraph_length, 0.0);
        // 0.5*0.4 + 0.5*0.3 + 0.3*0.3
        assert!((analysis.narrative_score - 0.44).abs() < 1e-9);
    }

    #[test]
    fn test_paragraph_boundary_coherence() {
        let paragraphs = vec!["Отряд подходит к башне.", "башне. Внутри темно.", "Ничего общего."];
        let sentences: Vec<String> = ["a.", "b.", "c.", "d."].iter().map(|s| s.to_string()).collect();
        // one of two boundaries shares a word, no transitions
        assert!((coherence_score(&paragraphs, &sentences) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_transitions_raise_coherence() {
        let paragraphs = vec!["Отряд подходит к башне.", "башне. Внутри темно."];
        let sentences: Vec<String> = ["Затем пришли.", "b.", "c.", "d."]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // boundary 1.0*0.6 + transitions (1/4)*0.4
        assert!((coherence_score(&paragraphs, &sentences) - 0.7).abs() < 1e-9);

        let busy: Vec<String> = ["Затем вдруг.", "Потом внезапно.", "c.", "d."]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // more transitions than sentences caps at 1.0
        assert!((coherence_score(&paragraphs, &busy) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_words_are_case_sensitive() {
        let paragraphs = vec!["Ворота Замка", "замка стены высоки"];
        let sentences: Vec<String> = ["a.", "b.", "c.", "d."].iter().map(|s| s.to_string()).collect();
        assert_eq!(coherence_score(&paragraphs, &sentences), 0.0);
    }

    #[test]
    fn test_pacing_buckets() {
        assert_eq!(pacing_score(&["a b", "c d", "e f"]), 0.4);

        let short = "слово ".repeat(5);
        let long = "слово ".repeat(30);
        // lengths 5, 30, 5 -> variance ~138.9
        assert_eq!(pacing_score(&[short.as_str(), long.as_str(), short.as_str()]), 0.8);

        let huge = "слово ".repeat(100);
        assert_eq!(pacing_score(&[short.as_str(), huge.as_str(), short.as_str()]), 0.5);
    }

    #[test]
    fn test_structure_markers() {
        let text = "Пролог: завязка и конфликт. Кульминация в башне. Развязка. Эпилог.";
        // 4 plot elements, intro and conclusion present
        assert!((structure_score(text) - 1.0).abs() < 1e-9);
        assert!((structure_score("Просто текст.") - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_transition_words_are_counted() {
        assert_eq!(count_transition_words("Затем они ушли. Вдруг грянул гром."), 2);
        let analysis = NarrativeFlowScorer::default().analyze("Тишина.");
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("слов-переходов")));
    }
}
