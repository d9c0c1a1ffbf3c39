use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::fetcher::FetchError;

/// One selectable entry of a feed, with HTML already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeedArticle {
    /// Position in the returned list; pass it back as `article_index`.
    pub index: usize,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub content: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC, when the feed dates its entries.
    pub published: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl FeedArticle {
    /// The text to analyze: full content when the feed carries it, else the summary.
    pub fn body(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("could not fetch feed: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid feed: {0}")]
    Parse(String),

    #[error("feed contains no articles with text")]
    Empty,
}
