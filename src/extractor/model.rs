use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

static SPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").unwrap());
static NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());
static ANY_WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Which strategy produced the text of an [`ExtractedPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Readability,
    ContentSelectors,
    DenseBlock,
    Paragraphs,
}

/// Plain text pulled out of a fetched HTML page.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub url: Url,
    pub title: Option<String>,
    pub text: String,
    pub method: ExtractionMethod,
}

#[derive(Debug)]
pub struct ReadabilityResult {
    pub title: Option<String>,
    pub text: String,
    pub method: ExtractionMethod,
}

pub fn normalize_whitespace(text: &str) -> String {
    // First preserve intentional line breaks and normalize spaces
    let text = text.trim();

    // Replace multiple spaces/tabs with single space
    let spaced = SPACE_REGEX.replace_all(text, " ");

    // Convert multiple consecutive newlines to double newlines
    NEWLINE_REGEX.replace_all(&spaced, "\n\n").to_string()
}

/// Collapse every run of whitespace, newlines included, into one space.
pub fn collapse_whitespace(text: &str) -> String {
    ANY_WHITESPACE_REGEX.replace_all(text.trim(), " ").to_string()
}
