//! HTTP client for a hosted model inference API.
//!
//! Speaks the Hugging Face Inference API wire format: `POST {base}/models/{id}`
//! with a JSON `inputs` payload. Both summarization and text classification
//! go through the same client.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode, header};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::models::backend::{
    BackendError, LengthBounds, RawLabel, SentimentModel, SummarizationModel,
};

const USER_AGENT: &str = concat!("NewsLens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    /// One label distribution per input.
    Nested(Vec<Vec<RawLabel>>),
    /// Either one top label per input, or the distribution of a single input.
    Flat(Vec<RawLabel>),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Value,
}

impl InferenceClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(
            config.inference_url(),
            config.inference_token().map(str::to_string),
            config.inference_timeout(),
        )
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    async fn invoke(&self, model: &str, body: Value) -> Result<Value, BackendError> {
        let mut request = self
            .client
            .post(self.model_url(model))
            .header(header::ACCEPT, "application/json")
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorBody>(&payload)
                .map(|body| match body.error {
                    Value::String(message) => message,
                    other => other.to_string(),
                })
                .unwrap_or_else(|_| status.to_string());
            warn!(model, status = %status, reason = %reason, "inference call rejected");

            return Err(match status {
                StatusCode::NOT_FOUND | StatusCode::SERVICE_UNAVAILABLE => {
                    BackendError::ModelUnavailable {
                        model: model.to_string(),
                        reason,
                    }
                }
                _ => BackendError::Inference(format!("{status}: {reason}")),
            });
        }

        serde_json::from_str(&payload).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SummarizationModel for InferenceClient {
    #[instrument(skip(self, text), fields(model = %model, chars = text.len()))]
    async fn summarize(
        &self,
        model: &str,
        text: &str,
        bounds: LengthBounds,
    ) -> Result<String, BackendError> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "min_length": bounds.min_tokens,
                "max_length": bounds.max_tokens,
                "do_sample": false,
            },
        });

        let value = self.invoke(model, body).await?;
        let items: Vec<SummaryItem> = serde_json::from_value(value)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        let summary = items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or_else(|| BackendError::InvalidResponse("empty summary list".to_string()))?;
        debug!(summary_chars = summary.len(), "summary generated");
        Ok(summary)
    }
}

#[async_trait]
impl SentimentModel for InferenceClient {
    #[instrument(skip(self, inputs), fields(model = %model, inputs = inputs.len()))]
    async fn classify(&self, model: &str, inputs: &[String]) -> Result<Vec<RawLabel>, BackendError> {
        let body = json!({ "inputs": inputs });

        let value = self.invoke(model, body).await?;
        let response: ClassificationResponse = serde_json::from_value(value)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        top_labels(response, inputs.len())
    }
}

fn top_label(distribution: Vec<RawLabel>) -> Option<RawLabel> {
    distribution
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

fn top_labels(
    response: ClassificationResponse,
    expected: usize,
) -> Result<Vec<RawLabel>, BackendError> {
    let labels: Vec<RawLabel> = match response {
        ClassificationResponse::Nested(distributions) => {
            distributions.into_iter().filter_map(top_label).collect()
        }
        ClassificationResponse::Flat(labels) if expected == 1 => {
            top_label(labels).into_iter().collect()
        }
        ClassificationResponse::Flat(labels) => labels,
    };

    if labels.len() != expected {
        return Err(BackendError::InvalidResponse(format!(
            "expected {expected} classifications, got {}",
            labels.len()
        )));
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(label: &str, score: f64) -> RawLabel {
        RawLabel {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_nested_response_picks_best_per_input() {
        let response: ClassificationResponse = serde_json::from_value(json!([
            [{"label": "negative", "score": 0.1}, {"label": "positive", "score": 0.9}],
            [{"label": "negative", "score": 0.7}, {"label": "positive", "score": 0.3}]
        ]))
        .unwrap();
        let labels = top_labels(response, 2).unwrap();
        assert_eq!(labels, vec![label("positive", 0.9), label("negative", 0.7)]);
    }

    #[test]
    fn test_flat_response_for_single_input_is_a_distribution() {
        let response: ClassificationResponse = serde_json::from_value(json!([
            {"label": "LABEL_0", "score": 0.2},
            {"label": "LABEL_1", "score": 0.5},
            {"label": "LABEL_2", "score": 0.3}
        ]))
        .unwrap();
        let labels = top_labels(response, 1).unwrap();
        assert_eq!(labels, vec![label("LABEL_1", 0.5)]);
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let response: ClassificationResponse =
            serde_json::from_value(json!([[{"label": "positive", "score": 0.9}]])).unwrap();
        assert!(matches!(
            top_labels(response, 3),
            Err(BackendError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_model_url_joins_without_double_slash() {
        let client =
            InferenceClient::new("http://localhost:9000/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.model_url("facebook/bart-large-cnn"),
            "http://localhost:9000/models/facebook/bart-large-cnn"
        );
    }
}
