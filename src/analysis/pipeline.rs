//! Runs one request through resolution, language detection, summarization and
//! sentiment classification, in that order.

use chrono::Utc;
use tracing::{Span, info, instrument, warn};
use uuid::Uuid;

use crate::analysis::errors::AnalysisError;
use crate::analysis::language;
use crate::analysis::sentiment;
use crate::analysis::stats::text_statistics;
use crate::analysis::summarizer;
use crate::analysis::types::{AnalysisResult, AnalysisStatus, PipelineState, StageOutcome};
use crate::feeds::FeedArticle;
use crate::models::Models;
use crate::sources::{AnalysisRequest, ExtractedDocument, MAX_TEXT_CHARS, Resolution, resolve};

#[derive(Debug)]
pub enum PipelineOutput {
    Analysis(Box<AnalysisResult>),
    /// The request named a feed but no article; the client picks one.
    ArticleSelection {
        feed_url: String,
        articles: Vec<FeedArticle>,
    },
}

#[derive(Clone)]
pub struct Pipeline {
    models: Models,
}

impl Pipeline {
    pub fn new(models: Models) -> Self {
        Self { models }
    }

    /// Resolve the request and analyze the resulting text.
    ///
    /// Only resolution errors are returned; model stage failures are recorded
    /// on the result, which is then [`AnalysisStatus::Partial`].
    #[instrument(skip_all, fields(analysis_id = tracing::field::Empty, source = ?request.source_kind()))]
    pub async fn run(&self, request: AnalysisRequest) -> Result<PipelineOutput, AnalysisError> {
        let id = Uuid::new_v4();
        Span::current().record("analysis_id", tracing::field::display(id));

        let state = PipelineState::Received;
        let resolution = match resolve(request).await {
            Ok(resolution) => resolution,
            Err(error) => {
                warn!(kind = ?error.kind(), state = ?state.fail(), error = %error, "request rejected");
                return Err(error);
            }
        };

        match resolution {
            Resolution::Articles { feed_url, articles } => {
                info!(count = articles.len(), "returning feed articles for selection");
                Ok(PipelineOutput::ArticleSelection { feed_url, articles })
            }
            Resolution::Document(document) => Ok(PipelineOutput::Analysis(Box::new(
                self.analyze(id, document).await,
            ))),
        }
    }

    async fn analyze(&self, id: Uuid, document: ExtractedDocument) -> AnalysisResult {
        let mut state = PipelineState::Extracted;

        let language = language::detect(&self.models, &document.text);
        state = state.advance();

        let summary_choice = self.models.summary_policy().select(&language.code);
        let summary: StageOutcome<_> =
            summarizer::summarize(&self.models, &document.text, &summary_choice)
                .await
                .into();
        state = state.advance();

        let sentiment_choice = self.models.sentiment_policy().select(&language.code);
        let sentiment: StageOutcome<_> =
            sentiment::classify(&self.models, &document.text, &sentiment_choice)
                .await
                .into();
        state = state.advance();

        for (stage, outcome) in [
            ("summarization", failure(&summary)),
            ("sentiment", failure(&sentiment)),
        ] {
            if let Some(message) = outcome {
                warn!(stage, error = %message, "stage failed, continuing");
            }
        }

        let status = if summary.is_completed() && sentiment.is_completed() {
            AnalysisStatus::Complete
        } else {
            AnalysisStatus::Partial
        };

        let mut warnings = Vec::new();
        if document.truncated {
            warnings.push(format!(
                "Text was truncated to the first {MAX_TEXT_CHARS} characters"
            ));
        }

        let statistics = text_statistics(&document.text);
        state = state.advance();
        info!(language = %language.code, ?status, "analysis finished");

        AnalysisResult {
            id,
            analyzed_at: Utc::now(),
            status,
            stage: state,
            warnings,
            document,
            language,
            summary,
            sentiment,
            statistics,
        }
    }
}

fn failure<T>(outcome: &StageOutcome<T>) -> Option<&str> {
    match outcome {
        StageOutcome::Completed(_) => None,
        StageOutcome::Failed { message, .. } => Some(message.as_str()),
    }
}
