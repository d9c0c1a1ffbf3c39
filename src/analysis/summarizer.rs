//! Abstractive summarization stage.

use tracing::{info, instrument};

use crate::analysis::errors::AnalysisError;
use crate::analysis::types::SummaryResult;
use crate::models::{LengthBounds, ModelChoice, Models};

/// Only the head of long documents is sent to the model.
pub const MAX_INPUT_WORDS: usize = 1000;
pub const MAX_SUMMARY_TOKENS: u32 = 150;
pub const MIN_SUMMARY_TOKENS: u32 = 30;
/// Inputs shorter than this get proportionally shorter summaries.
pub const SHORT_INPUT_WORDS: usize = 200;
const MIN_TRAILING_FRAGMENT_CHARS: usize = 10;

#[instrument(skip_all, fields(model = %choice.identifier, tier = ?choice.tier))]
pub async fn summarize(
    models: &Models,
    text: &str,
    choice: &ModelChoice,
) -> Result<SummaryResult, AnalysisError> {
    let input = prepare_input(text);
    let bounds = length_bounds(input.split_whitespace().count());

    let raw = models
        .summarizer()
        .summarize(&choice.identifier, &input, bounds)
        .await
        .map_err(|e| AnalysisError::from_backend(e, AnalysisError::SummarizationFailed))?;

    let summary = tidy_summary(&raw);
    if summary.is_empty() {
        return Err(AnalysisError::SummarizationFailed(
            "model returned an empty summary".to_string(),
        ));
    }

    let original_words = text.split_whitespace().count();
    let summary_words = summary.split_whitespace().count();
    let compression_ratio = if original_words == 0 {
        0.0
    } else {
        ((summary_words as f64 / original_words as f64) * 1000.0).round() / 10.0
    };
    info!(original_words, summary_words, "summary generated");

    Ok(SummaryResult {
        text: summary,
        model_used: choice.clone(),
        original_words,
        summary_words,
        compression_ratio,
    })
}

/// First `MAX_INPUT_WORDS` words on a single line.
fn prepare_input(text: &str) -> String {
    text.split_whitespace()
        .take(MAX_INPUT_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token bounds for an input of `words` words; always `1 <= min <= max`.
pub fn length_bounds(words: usize) -> LengthBounds {
    if words >= SHORT_INPUT_WORDS {
        return LengthBounds {
            min_tokens: MIN_SUMMARY_TOKENS,
            max_tokens: MAX_SUMMARY_TOKENS,
        };
    }

    let half = u32::try_from(words / 2).unwrap_or(MAX_SUMMARY_TOKENS);
    let max_tokens = half.min(MAX_SUMMARY_TOKENS).max(1);
    let min_tokens = (max_tokens / 2).min(MIN_SUMMARY_TOKENS).clamp(1, max_tokens);

    LengthBounds {
        min_tokens,
        max_tokens,
    }
}

/// Drop a dangling fragment after the last full stop and capitalize.
fn tidy_summary(raw: &str) -> String {
    let mut summary = raw.trim();

    if let Some(last_stop) = summary.rfind('.') {
        let tail = summary[last_stop + 1..].trim();
        if !tail.is_empty() && tail.chars().count() < MIN_TRAILING_FRAGMENT_CHARS {
            summary = &summary[..=last_stop];
        }
    }

    let mut chars = summary.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
