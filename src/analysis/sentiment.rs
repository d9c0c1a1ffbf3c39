//! Sentiment classification stage.
//!
//! Long texts are split into word chunks that go to the model as a single
//! batch; per-label scores are averaged and the best average wins.

use tracing::{debug, instrument};

use crate::analysis::errors::AnalysisError;
use crate::analysis::types::{ConfidenceTier, SentimentLabel, SentimentResult};
use crate::extractor::model::collapse_whitespace;
use crate::extractor::text::mask_links;
use crate::models::{ModelChoice, Models, RawLabel};

/// Texts up to this many words are classified whole.
pub const SINGLE_PASS_MAX_WORDS: usize = 300;
pub const CHUNK_WORDS: usize = 250;

#[instrument(skip_all, fields(model = %choice.identifier, tier = ?choice.tier))]
pub async fn classify(
    models: &Models,
    text: &str,
    choice: &ModelChoice,
) -> Result<SentimentResult, AnalysisError> {
    let inputs = chunk(&mask_links(&collapse_whitespace(text)));
    if inputs.is_empty() {
        return Err(AnalysisError::SentimentFailed(
            "no text left to classify".to_string(),
        ));
    }

    let labels = models
        .sentiment()
        .classify(&choice.identifier, &inputs)
        .await
        .map_err(|e| AnalysisError::from_backend(e, AnalysisError::SentimentFailed))?;

    let (label, confidence) = aggregate(&labels).ok_or_else(|| {
        AnalysisError::SentimentFailed("model returned no labels".to_string())
    })?;
    debug!(?label, confidence, chunks = inputs.len(), "sentiment classified");

    Ok(SentimentResult {
        label,
        confidence,
        tier: ConfidenceTier::from_confidence(confidence),
        model_used: choice.clone(),
        chunks_analyzed: inputs.len(),
    })
}

fn chunk(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if words.len() <= SINGLE_PASS_MAX_WORDS {
        return vec![words.join(" ")];
    }
    words.chunks(CHUNK_WORDS).map(|c| c.join(" ")).collect()
}

/// Map the label vocabularies of the supported models onto three classes.
pub fn normalize_label(raw: &str) -> SentimentLabel {
    let label = raw.trim().to_ascii_lowercase();
    if label.starts_with("pos") || label == "label_2" || label == "2" {
        SentimentLabel::Positive
    } else if label.starts_with("neg") || label == "label_0" || label == "0" {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

fn aggregate(labels: &[RawLabel]) -> Option<(SentimentLabel, f64)> {
    let mut best: Option<(SentimentLabel, f64)> = None;

    for candidate in [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ] {
        let scores: Vec<f64> = labels
            .iter()
            .filter(|raw| normalize_label(&raw.label) == candidate)
            .map(|raw| raw.score)
            .collect();
        if scores.is_empty() {
            continue;
        }

        let average = (scores.iter().sum::<f64>() / scores.len() as f64).clamp(0.0, 1.0);
        if best.is_none_or(|(_, score)| average > score) {
            best = Some((candidate, average));
        }
    }

    best
}
