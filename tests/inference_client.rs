use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

use newslens::models::{
    BackendError, InferenceClient, LengthBounds, RawLabel, SentimentModel, SummarizationModel,
};

fn client(server: &MockServer, token: Option<&str>) -> InferenceClient {
    InferenceClient::new(
        server.uri(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_summarize_sends_bounds_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-cnn"))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_partial_json(json!({
            "inputs": "Long article text",
            "parameters": { "min_length": 30, "max_length": 150, "do_sample": false }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "Short." }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let summary = client(&server, Some("hf_test"))
        .summarize(
            "facebook/bart-large-cnn",
            "Long article text",
            LengthBounds {
                min_tokens: 30,
                max_tokens: 150,
            },
        )
        .await
        .unwrap();
    assert_eq!(summary, "Short.");
}

#[tokio::test]
async fn test_classify_batches_inputs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/cardiffnlp/twitter-xlm-roberta-base-sentiment"))
        .and(body_partial_json(json!({ "inputs": ["first chunk", "second chunk"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [{ "label": "positive", "score": 0.8 }, { "label": "negative", "score": 0.2 }],
            [{ "label": "negative", "score": 0.6 }, { "label": "positive", "score": 0.4 }]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let labels = client(&server, None)
        .classify(
            "cardiffnlp/twitter-xlm-roberta-base-sentiment",
            &["first chunk".to_string(), "second chunk".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(
        labels,
        vec![
            RawLabel {
                label: "positive".to_string(),
                score: 0.8
            },
            RawLabel {
                label: "negative".to_string(),
                score: 0.6
            },
        ]
    );
}

#[tokio::test]
async fn test_loading_model_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Model facebook/bart-large-cnn is currently loading",
            "estimated_time": 20.0
        })))
        .mount(&server)
        .await;

    let error = client(&server, None)
        .summarize(
            "facebook/bart-large-cnn",
            "text",
            LengthBounds {
                min_tokens: 1,
                max_tokens: 2,
            },
        )
        .await
        .unwrap_err();

    match error {
        BackendError::ModelUnavailable { model, reason } => {
            assert_eq!(model, "facebook/bart-large-cnn");
            assert!(reason.contains("currently loading"));
        }
        other => panic!("Expected ModelUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_an_inference_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let error = client(&server, None)
        .classify("some/model", &["text".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(error, BackendError::Inference(_)));
}

#[tokio::test]
async fn test_unexpected_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generated": "x" })))
        .mount(&server)
        .await;

    let error = client(&server, None)
        .summarize(
            "facebook/bart-large-cnn",
            "text",
            LengthBounds {
                min_tokens: 1,
                max_tokens: 2,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(error, BackendError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let client = InferenceClient::new("http://127.0.0.1:9", None, Duration::from_secs(2)).unwrap();

    let error = client
        .classify("some/model", &["text".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(error, BackendError::Transport(_)));
}
