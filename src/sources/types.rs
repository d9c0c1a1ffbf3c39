use bytes::Bytes;
use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::feeds::FeedArticle;

/// Where the text of a request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Text,
    Url,
    File,
    Rss,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "url" => Ok(Self::Url),
            "file" => Ok(Self::File),
            "rss" => Ok(Self::Rss),
            other => Err(format!(
                "unknown input method '{other}', expected text, url, file or rss"
            )),
        }
    }
}

/// One analysis request, as received from a client.
#[derive(Debug, Clone)]
pub enum AnalysisRequest {
    Text(String),
    Url(String),
    File { file_name: String, bytes: Bytes },
    /// The index stays raw so that malformed values are reported as such.
    Rss {
        feed_url: String,
        article_index: Option<String>,
    },
}

impl AnalysisRequest {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            Self::Text(_) => SourceKind::Text,
            Self::Url(_) => SourceKind::Url,
            Self::File { .. } => SourceKind::File,
            Self::Rss { .. } => SourceKind::Rss,
        }
    }
}

/// Provenance of the analyzed text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SourceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

/// Plain text ready for analysis, within the accepted length bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExtractedDocument {
    pub text: String,
    pub origin: SourceKind,
    pub truncated: bool,
    pub source: SourceInfo,
}

#[derive(Debug, Clone)]
pub enum Resolution {
    Document(ExtractedDocument),
    /// A feed was given without choosing an article.
    Articles {
        feed_url: String,
        articles: Vec<FeedArticle>,
    },
}
