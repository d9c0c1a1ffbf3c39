use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::analysis::errors::{AnalysisError, ErrorKind};
use crate::analysis::stats::TextStatistics;
use crate::models::ModelChoice;
use crate::sources::ExtractedDocument;

/// Bucketed confidence shared by language detection and sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub const HIGH_THRESHOLD: f64 = 0.8;
    pub const MEDIUM_THRESHOLD: f64 = 0.5;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            Self::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LanguageResult {
    /// ISO-639-1 code, or `unknown`.
    pub code: String,
    pub name: String,
    pub confidence: f64,
    pub tier: ConfidenceTier,
    /// Whether a specific or multilingual model covers the language.
    pub supported: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SummaryResult {
    pub text: String,
    pub model_used: ModelChoice,
    pub original_words: usize,
    pub summary_words: usize,
    /// Summary length as a percentage of the original.
    pub compression_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub tier: ConfidenceTier,
    pub model_used: ModelChoice,
    pub chunks_analyzed: usize,
}

/// Result of a non-fatal stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome<T> {
    Completed(T),
    Failed { kind: ErrorKind, message: String },
}

impl<T> StageOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

impl<T> From<Result<T, AnalysisError>> for StageOutcome<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(error) => Self::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

/// Position of a request in the analysis sequence. `Errored` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Received,
    Extracted,
    LanguageDetected,
    Summarized,
    SentimentClassified,
    Complete,
    Errored,
}

impl PipelineState {
    pub fn advance(self) -> Self {
        match self {
            Self::Received => Self::Extracted,
            Self::Extracted => Self::LanguageDetected,
            Self::LanguageDetected => Self::Summarized,
            Self::Summarized => Self::SentimentClassified,
            Self::SentimentClassified | Self::Complete => Self::Complete,
            Self::Errored => Self::Errored,
        }
    }

    pub fn fail(self) -> Self {
        Self::Errored
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Errored)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    /// At least one model stage failed; the others are still reported.
    Partial,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub status: AnalysisStatus,
    pub stage: PipelineState,
    pub warnings: Vec<String>,
    pub document: ExtractedDocument,
    pub language: LanguageResult,
    #[schema(value_type = Object)]
    pub summary: StageOutcome<SummaryResult>,
    #[schema(value_type = Object)]
    pub sentiment: StageOutcome<SentimentResult>,
    pub statistics: TextStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ConfidenceTier::from_confidence(1.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.5), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.49), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_confidence(0.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_confidence(f64::NAN), ConfidenceTier::Low);
    }

    #[test]
    fn test_state_sequence() {
        let mut state = PipelineState::Received;
        let mut seen = vec![state];
        while !state.is_terminal() {
            state = state.advance();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                PipelineState::Received,
                PipelineState::Extracted,
                PipelineState::LanguageDetected,
                PipelineState::Summarized,
                PipelineState::SentimentClassified,
                PipelineState::Complete,
            ]
        );
    }

    #[test]
    fn test_errored_is_absorbing() {
        let state = PipelineState::Extracted.fail();
        assert_eq!(state, PipelineState::Errored);
        assert_eq!(state.advance(), PipelineState::Errored);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_stage_outcome_serialization() {
        let failed: StageOutcome<SentimentResult> =
            Err(AnalysisError::SentimentFailed("timeout".to_string())).into();
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "status": "failed",
                "kind": "sentiment_failed",
                "message": "Sentiment analysis failed: timeout"
            })
        );
        assert!(!failed.is_completed());

        let completed: StageOutcome<LanguageResult> = Ok(LanguageResult {
            code: "en".to_string(),
            name: "English".to_string(),
            confidence: 0.9,
            tier: ConfidenceTier::High,
            supported: true,
        })
        .into();
        let value = serde_json::to_value(&completed).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["code"], "en");
        assert_eq!(value["tier"], "High");
    }
}
