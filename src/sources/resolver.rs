//! Turns an [`AnalysisRequest`] into plain text within the accepted bounds.
//!
//! Every input kind ends in the same length check: text shorter than
//! [`MIN_TEXT_CHARS`] is rejected, text longer than [`MAX_TEXT_CHARS`] is cut
//! and flagged as truncated. Lengths count Unicode scalar values.

use bytes::Bytes;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::analysis::AnalysisError;
use crate::extractor::extract;
use crate::extractor::pdf::extract_pdf_text;
use crate::extractor::text::truncate_chars;
use crate::feeds::{FeedArticle, FeedError, get_feed_articles};
use crate::fetcher::{FetchError, decode_lossy, fetch};
use crate::sources::types::{AnalysisRequest, ExtractedDocument, Resolution, SourceInfo, SourceKind};

pub const MIN_TEXT_CHARS: usize = 50;
pub const MAX_TEXT_CHARS: usize = 50_000;
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf"];

#[instrument(skip_all, fields(source = ?request.source_kind()))]
pub async fn resolve(request: AnalysisRequest) -> Result<Resolution, AnalysisError> {
    match request {
        AnalysisRequest::Text(text) => {
            bounded_document(&text, SourceKind::Text, SourceInfo::default())
                .map(Resolution::Document)
        }
        AnalysisRequest::Url(url) => resolve_url(&url).await.map(Resolution::Document),
        AnalysisRequest::File { file_name, bytes } => {
            resolve_file(&file_name, bytes).await.map(Resolution::Document)
        }
        AnalysisRequest::Rss {
            feed_url,
            article_index,
        } => resolve_feed(&feed_url, article_index.as_deref()).await,
    }
}

/// Apply the length bounds to already extracted text.
pub fn bounded_document(
    text: &str,
    origin: SourceKind,
    source: SourceInfo,
) -> Result<ExtractedDocument, AnalysisError> {
    let text = text.trim();
    let chars = text.chars().count();

    if chars < MIN_TEXT_CHARS {
        return Err(AnalysisError::TooShort {
            chars,
            min: MIN_TEXT_CHARS,
        });
    }

    let truncated = chars > MAX_TEXT_CHARS;
    let text = if truncated {
        warn!(chars, max = MAX_TEXT_CHARS, "text truncated");
        truncate_chars(text, MAX_TEXT_CHARS).to_string()
    } else {
        text.to_string()
    };

    Ok(ExtractedDocument {
        text,
        origin,
        truncated,
        source,
    })
}

async fn resolve_url(url: &str) -> Result<ExtractedDocument, AnalysisError> {
    let response = fetch(url.trim())
        .await
        .map_err(fetch_failed)?;

    let page = extract(&response).ok_or_else(|| {
        AnalysisError::ExtractionFailed("no readable text found on the page".to_string())
    })?;

    let chars = page.text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(AnalysisError::ExtractionFailed(format!(
            "the page yielded only {chars} characters of text"
        )));
    }
    info!(chars, method = ?page.method, "extracted page text");

    bounded_document(
        &page.text,
        SourceKind::Url,
        SourceInfo {
            url: Some(page.url.to_string()),
            title: page.title,
            ..SourceInfo::default()
        },
    )
}

async fn resolve_file(file_name: &str, bytes: Bytes) -> Result<ExtractedDocument, AnalysisError> {
    let extension = allowed_extension(file_name)?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AnalysisError::TooLarge {
            bytes: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }

    let text = if extension == "pdf" {
        let text = extract_pdf_text(bytes.to_vec())
            .await
            .map_err(|e| AnalysisError::ExtractionFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(AnalysisError::ExtractionFailed(
                "the PDF has no text layer".to_string(),
            ));
        }
        text
    } else {
        decode_lossy(&bytes)
    };

    bounded_document(
        &text,
        SourceKind::File,
        SourceInfo {
            file_name: Some(file_name.to_string()),
            ..SourceInfo::default()
        },
    )
}

/// Lower-cased extension of an accepted upload.
fn allowed_extension(file_name: &str) -> Result<String, AnalysisError> {
    if file_name.trim().is_empty() {
        return Err(AnalysisError::InvalidFile("no file selected".to_string()));
    }

    Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            AnalysisError::InvalidFile(format!(
                "'{file_name}' is not a supported file type, upload a .txt or .pdf file"
            ))
        })
}

async fn resolve_feed(
    feed_url: &str,
    article_index: Option<&str>,
) -> Result<Resolution, AnalysisError> {
    let index = article_index
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(parse_index)
        .transpose()?;

    let articles = list_feed_articles(feed_url).await?;

    let Some(index) = index else {
        return Ok(Resolution::Articles {
            feed_url: feed_url.trim().to_string(),
            articles,
        });
    };

    let article = select_article(articles, index)?;
    info!(index, title = %article.title, "selected feed article");

    bounded_document(
        article.body(),
        SourceKind::Rss,
        SourceInfo {
            url: Some(article.link.clone()).filter(|link| !link.is_empty()),
            title: Some(article.title.clone()),
            feed_url: Some(feed_url.trim().to_string()),
            published: article.published.clone(),
            ..SourceInfo::default()
        },
    )
    .map(Resolution::Document)
}

/// Articles of a feed, with feed failures mapped onto the analysis errors.
pub async fn list_feed_articles(feed_url: &str) -> Result<Vec<FeedArticle>, AnalysisError> {
    get_feed_articles(feed_url.trim()).await.map_err(|e| match e {
        FeedError::Fetch(e) => fetch_failed(e),
        other => AnalysisError::ExtractionFailed(other.to_string()),
    })
}

fn fetch_failed(error: FetchError) -> AnalysisError {
    let transient = error.is_transient();
    warn!(error = %error, transient, "fetch failed");
    if transient {
        AnalysisError::FetchFailed(format!("{error} (temporary, try again later)"))
    } else {
        AnalysisError::FetchFailed(error.to_string())
    }
}

fn parse_index(raw: &str) -> Result<usize, AnalysisError> {
    raw.parse()
        .map_err(|_| AnalysisError::InvalidIndex(format!("'{raw}' is not an article number")))
}

fn select_article(articles: Vec<FeedArticle>, index: usize) -> Result<FeedArticle, AnalysisError> {
    let count = articles.len();
    articles.into_iter().nth(index).ok_or_else(|| {
        AnalysisError::InvalidIndex(format!(
            "article {index} does not exist, the feed has {count} articles"
        ))
    })
}
