#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::connect_info::MockConnectInfo,
    http::{Request, Response},
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, path_regex},
};

use newslens::{app_state::AppState, config::Config, models::Models, router};

pub const BOUNDARY: &str = "newslens-test-boundary";

pub const ENGLISH_TEXT: &str =
    "The community garden opened this weekend and neighbours were delighted.";

pub fn test_app(inference_url: &str) -> Router {
    test_app_with_limit(inference_url, 100)
}

pub fn test_app_with_limit(inference_url: &str, max_requests: u32) -> Router {
    let config = Config::default()
        .with_inference_url(inference_url)
        .with_rate_limit(max_requests, 3600);
    let models = Models::from_config(&config).expect("failed to build models");

    router(AppState::new(config, models))
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4242))))
}

/// Answer every summarization and sentiment call like a healthy backend.
pub async fn mount_healthy_models(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/models/(facebook|sshleifer|csebuetnlp)/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "summary_text": "the community garden opened to delighted neighbours." }
        ])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/models/(cardiffnlp/.+|distilbert-base-uncased-finetuned-sst-2-english)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "positive", "score": 0.93 },
            { "label": "neutral", "score": 0.05 },
            { "label": "negative", "score": 0.02 }
        ]])))
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, route: &str, status: u16, content_type: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_bytes(body.as_bytes())
                .insert_header("Content-Type", content_type),
        )
        .mount(server)
        .await;
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn rss_feed(items: &[(&str, &str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, link, description)| {
            format!(
                "<item><title>{title}</title><link>{link}</link><description>{description}</description><pubDate>Mon, 02 Jun 2025 08:00:00 GMT</pubDate></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Test Feed</title><link>https://feed.example.com</link><description>Test</description>{items}</channel></rss>"#
    )
}
