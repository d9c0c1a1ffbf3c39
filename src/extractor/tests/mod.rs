use bytes::Bytes;
use chrono::Utc;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fs;
use url::Url;

use crate::extractor::extract;
use crate::fetcher::types::{Charset, PageResponse};

#[test]
fn test_extract_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://example.com/article");
    let content = extract(&response).expect("article should be extracted");

    assert!(content.title.unwrap_or_default().contains("Riverside Library"));
    assert!(content.text.contains("first paragraph"));
    assert!(content.text.contains("second paragraph"));
    assert!(content.text.contains("third paragraph"));
    assert!(!content.text.contains("window.analytics"));
    assert!(!content.text.contains("font-family"));
    assert!(!content.text.contains("All rights reserved"));
    assert!(!content.text.contains("Accept or decline"));
    assert_eq!(content.url.as_str(), "https://example.com/article");
}

#[test]
fn test_extract_blog_post() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/blog.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://blog.example.com/post");
    let content = extract(&response).expect("blog post should be extracted");

    assert!(
        content
            .title
            .unwrap_or_default()
            .contains("How to Build Better Software")
    );
    assert!(content.text.contains("Building better software"));
    assert!(content.text.contains("measure what matters"));
    assert!(!content.text.contains("Subscribe to our newsletter"));
}

#[test]
fn test_reject_empty_page() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/empty.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://example.com/empty");

    // Only a script shell and a noscript notice: nothing to analyze
    assert!(extract(&response).is_none());
}

#[test]
fn test_minimal_valid_content() {
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Valid Article</title></head><body><article><h1>Valid Article</h1><p>{}</p></article></body></html>"#,
        "This is a valid article with enough content to pass the minimum requirements for extraction. ".repeat(20)
    );

    let response = create_test_response(html, "https://example.com/valid");
    let content = extract(&response).expect("content should be extracted");

    assert_eq!(content.title.as_deref(), Some("Valid Article"));
    assert!(content.text.len() > 250);
}

#[test]
fn test_malformed_html() {
    let html =
        "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content".to_string();

    let response = create_test_response(html, "https://example.com/broken");

    // Should handle malformed HTML gracefully
    if let Some(content) = extract(&response) {
        assert_eq!(content.title.as_deref(), Some("Broken"));
        assert!(content.text.contains("Unclosed tags"));
    }
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body_raw: Bytes::from(html.clone()),
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/.*"
        ) {
            let response = create_test_response(html, &url);
            // Should never panic regardless of input
            let _ = extract(&response);
        }

        #[test]
        fn test_extract_output_has_no_crumbs(
            html in ".*",
        ) {
            let response = create_test_response(html, "https://example.com");
            if let Some(content) = extract(&response) {
                assert!(content.text.lines().all(|line| line.chars().count() > 10));
            }
        }
    }
}
