pub mod backend;
pub mod inference;
pub mod policy;

pub use backend::{
    BackendError, Detection, LanguageDetection, LengthBounds, RawLabel, SentimentModel,
    SummarizationModel,
};
pub use inference::InferenceClient;
pub use policy::{ModelChoice, ModelPolicy, ModelTier};

use std::sync::Arc;

use crate::config::Config;
use crate::extractor::language::WhatlangDetector;

/// The loaded model capabilities and the policies choosing between them.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct Models {
    detector: Arc<dyn LanguageDetection>,
    summarizer: Arc<dyn SummarizationModel>,
    sentiment: Arc<dyn SentimentModel>,
    summary_policy: ModelPolicy,
    sentiment_policy: ModelPolicy,
}

impl Models {
    pub fn new(
        detector: Arc<dyn LanguageDetection>,
        summarizer: Arc<dyn SummarizationModel>,
        sentiment: Arc<dyn SentimentModel>,
    ) -> Self {
        Self {
            detector,
            summarizer,
            sentiment,
            summary_policy: ModelPolicy::summarization(),
            sentiment_policy: ModelPolicy::sentiment(),
        }
    }

    /// Local language detection plus the configured inference API for the
    /// generative and classification models.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let client = Arc::new(InferenceClient::from_config(config)?);
        Ok(Self::new(Arc::new(WhatlangDetector), client.clone(), client))
    }

    pub fn detector(&self) -> &dyn LanguageDetection {
        self.detector.as_ref()
    }
    pub fn summarizer(&self) -> &dyn SummarizationModel {
        self.summarizer.as_ref()
    }
    pub fn sentiment(&self) -> &dyn SentimentModel {
        self.sentiment.as_ref()
    }
    pub fn summary_policy(&self) -> &ModelPolicy {
        &self.summary_policy
    }
    pub fn sentiment_policy(&self) -> &ModelPolicy {
        &self.sentiment_policy
    }
}

#[cfg(test)]
impl Models {
    pub(crate) fn mocked(
        detector: backend::MockLanguageDetection,
        summarizer: backend::MockSummarizationModel,
        sentiment: backend::MockSentimentModel,
    ) -> Self {
        Self::new(Arc::new(detector), Arc::new(summarizer), Arc::new(sentiment))
    }
}
