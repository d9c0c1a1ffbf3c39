use tracing::{debug, instrument};

use crate::analysis::types::{ConfidenceTier, LanguageResult};
use crate::extractor::language::language_name;
use crate::extractor::text::letters_only;
use crate::models::Models;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Below this many letters a guess is not worth making.
pub const MIN_DETECTION_CHARS: usize = 20;

/// Detect the language of `text`, never failing: no confident guess means
/// `unknown` with zero confidence.
#[instrument(skip_all, fields(chars = text.len()))]
pub fn detect(models: &Models, text: &str) -> LanguageResult {
    let cleaned = letters_only(text);

    let detection = if cleaned.chars().count() < MIN_DETECTION_CHARS {
        debug!("too few letters for language detection");
        None
    } else {
        models.detector().detect(&cleaned)
    };

    let (code, confidence) = match detection {
        Some(detection) => (detection.code, detection.confidence.clamp(0.0, 1.0)),
        None => (UNKNOWN_LANGUAGE.to_string(), 0.0),
    };

    let supported = code != UNKNOWN_LANGUAGE
        && (models.summary_policy().supports(&code) || models.sentiment_policy().supports(&code));
    debug!(code = %code, confidence, supported, "language detected");

    LanguageResult {
        name: language_name(&code),
        tier: ConfidenceTier::from_confidence(confidence),
        code,
        confidence,
        supported,
    }
}
