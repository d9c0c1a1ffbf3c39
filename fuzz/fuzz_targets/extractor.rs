#![no_main]

use bytes::Bytes;
use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use reqwest::{StatusCode, header::HeaderMap};
use url::Url;

use newslens::extractor::extract;
use newslens::fetcher::{Charset, PageResponse};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    let response = PageResponse {
        url_final: Url::parse("https://example.com").unwrap(),
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body_raw: Bytes::from(html.clone()),
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    };

    // Arbitrary markup must never panic the extractor
    let _ = extract(&response);
});
