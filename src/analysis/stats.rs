//! Descriptive statistics reported alongside every analysis.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use utoipa::ToSchema;

const WORDS_PER_MINUTE: f64 = 200.0;
const TOP_WORDS: usize = 10;
const MIN_TOP_WORD_CHARS: usize = 4;
const WORD_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']', '{', '}',
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
        "will", "would", "could", "should", "may", "might", "must", "shall", "this", "that",
        "these", "those",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TextStatistics {
    pub total_characters: usize,
    pub total_words: usize,
    pub total_sentences: usize,
    pub total_paragraphs: usize,
    pub avg_word_length: f64,
    pub reading_time_minutes: f64,
    pub most_frequent_words: Vec<WordCount>,
}

pub fn text_statistics(text: &str) -> TextStatistics {
    let words: Vec<&str> = text.split_whitespace().collect();
    let letters: usize = words.iter().map(|word| word.chars().count()).sum();
    let avg_word_length = if words.is_empty() {
        0.0
    } else {
        letters as f64 / words.len() as f64
    };

    TextStatistics {
        total_characters: text.chars().count(),
        total_words: words.len(),
        total_sentences: text.split('.').filter(|s| !s.trim().is_empty()).count(),
        total_paragraphs: text.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        avg_word_length: round1(avg_word_length),
        reading_time_minutes: round1(words.len() as f64 / WORDS_PER_MINUTE),
        most_frequent_words: most_frequent_words(&words),
    }
}

/// Ties keep first-occurrence order.
fn most_frequent_words(words: &[&str]) -> Vec<WordCount> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, word) in words.iter().enumerate() {
        let word = word.to_lowercase();
        let word = word.trim_matches(WORD_PUNCTUATION);
        if word.chars().count() < MIN_TOP_WORD_CHARS || STOP_WORDS.contains(word) {
            continue;
        }
        counts.entry(word.to_string()).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(TOP_WORDS)
        .map(|(word, count, _)| WordCount { word, count })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
