use crate::fetcher::{
    errors::FetchError,
    pipeline::process_response,
    types::{ContentKind, PageResponse},
};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = concat!(
    "NewsLens/",
    env!("CARGO_PKG_VERSION"),
    " (+https://newslens.example.com)"
);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetch an HTML page.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_as(url, ContentKind::Html).await
}

/// Fetch an RSS/Atom/JSON feed document.
pub async fn fetch_feed(url: &str) -> Result<PageResponse, FetchError> {
    fetch_as(url, ContentKind::Feed).await
}

#[instrument(skip_all, fields(url = %url, kind = ?kind))]
pub async fn fetch_as(url: &str, kind: ContentKind) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;
    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(parsed_url.scheme().to_string()));
    }

    let response = HTTP_CLIENT
        .get(parsed_url)
        .header(header::ACCEPT, kind.accept_header())
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();
    let headers = response.headers().clone();

    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            transient: status.is_server_error(),
        });
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or(match kind {
            ContentKind::Html => "text/html",
            ContentKind::Feed => "application/xml",
        })
        .to_string();

    if !kind.accepts(&content_type) {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Check body size after download (in case Content-Length was missing)
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    debug!(
        status = %status,
        bytes = body_bytes.len(),
        content_type = %content_type,
        "fetched document"
    );

    process_response(final_url, status, headers, body_bytes, &content_type)
}
