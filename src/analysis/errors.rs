use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::BackendError;

/// Stable machine-readable error category, reported next to every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TooShort,
    TooLarge,
    InvalidFile,
    InvalidIndex,
    FetchFailed,
    ExtractionFailed,
    SummarizationFailed,
    SentimentFailed,
    ModelUnavailable,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Text is too short for analysis: {chars} characters, at least {min} required")]
    TooShort { chars: usize, min: usize },

    #[error("File is too large: {bytes} bytes, at most {max} allowed")]
    TooLarge { bytes: usize, max: usize },

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Invalid article index: {0}")]
    InvalidIndex(String),

    #[error("Could not fetch content: {0}")]
    FetchFailed(String),

    #[error("Could not extract text: {0}")]
    ExtractionFailed(String),

    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("Sentiment analysis failed: {0}")]
    SentimentFailed(String),

    #[error("Model {model} is unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooShort { .. } => ErrorKind::TooShort,
            Self::TooLarge { .. } => ErrorKind::TooLarge,
            Self::InvalidFile(_) => ErrorKind::InvalidFile,
            Self::InvalidIndex(_) => ErrorKind::InvalidIndex,
            Self::FetchFailed(_) => ErrorKind::FetchFailed,
            Self::ExtractionFailed(_) => ErrorKind::ExtractionFailed,
            Self::SummarizationFailed(_) => ErrorKind::SummarizationFailed,
            Self::SentimentFailed(_) => ErrorKind::SentimentFailed,
            Self::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
        }
    }

    /// Map a backend failure of a model stage; `stage_failure` wraps every
    /// error except an unavailable model.
    pub fn from_backend(error: BackendError, stage_failure: fn(String) -> Self) -> Self {
        match error {
            BackendError::ModelUnavailable { model, reason } => {
                Self::ModelUnavailable { model, reason }
            }
            other => stage_failure(other.to_string()),
        }
    }
}
