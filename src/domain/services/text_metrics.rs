//! Shared text helpers: tokenizing, sentence splitting, basic statistics

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::TextMetrics;

static TERMINATOR_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static TERMINATED_SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").unwrap());

/// Whitespace-separated words
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split on runs of `.`, `!` or `?`, dropping the terminators and blank pieces
pub fn split_on_terminators(text: &str) -> Vec<&str> {
    TERMINATOR_RUN_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Number of raw pieces produced by splitting on terminator runs, blanks included
pub fn terminator_piece_count(text: &str) -> usize {
    TERMINATOR_RUN_RE.split(text).count()
}

/// Split into sentences keeping the closing punctuation run, e.g. `"Кто там?"`
pub fn split_terminated_sentences(text: &str) -> Vec<&str> {
    TERMINATED_SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.trim_end_matches(['.', '!', '?']).trim().is_empty())
        .collect()
}

/// Scan character by character, closing a sentence at every `.`, `!` or `?`.
///
/// A trailing fragment without a terminator still counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Population variance
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Word, sentence and vocabulary statistics of a document
pub fn calculate_text_metrics(text: &str) -> TextMetrics {
    let words = words(text);
    let sentences = split_on_terminators(text);
    let unique_words = words.iter().collect::<HashSet<_>>().len();

    TextMetrics {
        word_count: words.len(),
        sentence_count: sentences.len(),
        avg_sentence_length: words.len() as f64 / sentences.len().max(1) as f64,
        unique_words,
        lexical_diversity: unique_words as f64 / words.len().max(1) as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_keeps_tail() {
        let sentences = split_sentences("Герои входят. Кто там?! Тишина");
        assert_eq!(sentences, vec!["Герои входят.", "Кто там?", "!", "Тишина"]);
    }

    #[test]
    fn test_split_terminated_sentences() {
        let sentences = split_terminated_sentences("Что это?! Ответ: тень... ");
        assert_eq!(sentences, vec!["Что это?!", "Ответ: тень..."]);
        assert!(split_terminated_sentences(" ... ").is_empty());
    }

    #[test]
    fn test_text_metrics() {
        let metrics = calculate_text_metrics("Один два два. Три!");
        assert_eq!(metrics.word_count, 4);
        assert_eq!(metrics.sentence_count, 2);
        assert_eq!(metrics.unique_words, 3);
        assert!((metrics.avg_sentence_length - 2.0).abs() < 1e-9);
        assert!((metrics.lexical_diversity - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_metrics() {
        let metrics = calculate_text_metrics("");
        assert_eq!(metrics, TextMetrics::default());
    }

    #[test]
    fn test_variance_and_rounding() {
        assert_eq!(variance(&[]), 0.0);
        assert!((variance(&[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert_eq!(round_to(0.123456, 3), 0.123);
    }
}
