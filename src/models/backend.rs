//! Capability traits for the external models.
//!
//! The pipeline only talks to these traits; which concrete detector or
//! inference client sits behind them is decided once at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A language guess produced by a detection capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// ISO-639-1 code where one exists, otherwise the detector's own code.
    pub code: String,
    pub confidence: f64,
}

/// One classification label with its score, as reported by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub label: String,
    pub score: f64,
}

/// Generation length limits, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBounds {
    pub min_tokens: u32,
    pub max_tokens: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The model is unknown to the backend or not loaded right now.
    #[error("model {model} unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },

    #[error("inference request failed: {0}")]
    Transport(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("unexpected inference response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait LanguageDetection: Send + Sync {
    /// `None` when the text gives no confident guess.
    fn detect(&self, text: &str) -> Option<Detection>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    async fn summarize(
        &self,
        model: &str,
        text: &str,
        bounds: LengthBounds,
    ) -> Result<String, BackendError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Classify every input in one call, returning the top label per input in
    /// input order.
    async fn classify(&self, model: &str, inputs: &[String]) -> Result<Vec<RawLabel>, BackendError>;
}
