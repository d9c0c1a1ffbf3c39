use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::{AnalysisResult, ErrorKind};
use crate::feeds::{FeedArticle, FeedCategory};
use crate::sources::{AnalysisRequest, SourceKind};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

/// An article index given either as a JSON number or as a string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ArticleIndex {
    Number(i64),
    Text(String),
}

impl ArticleIndex {
    fn into_raw(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// JSON body of `POST /api/analyze`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// `text` (default), `url` or `rss`. Files need the multipart endpoint.
    pub input_method: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub rss_url: Option<String>,
    pub article_index: Option<ArticleIndex>,
}

impl AnalyzeRequest {
    pub fn into_request(self) -> Result<AnalysisRequest, String> {
        let kind: SourceKind = self.input_method.as_deref().unwrap_or_default().parse()?;
        match kind {
            SourceKind::Text => Ok(AnalysisRequest::Text(self.text.unwrap_or_default())),
            SourceKind::Url => Ok(AnalysisRequest::Url(required(self.url, "url")?)),
            SourceKind::Rss => Ok(AnalysisRequest::Rss {
                feed_url: required(self.rss_url, "rss_url")?,
                article_index: self.article_index.map(ArticleIndex::into_raw),
            }),
            SourceKind::File => {
                Err("file uploads must be sent as multipart/form-data to /analyze".to_string())
            }
        }
    }
}

/// Multipart form of `POST /analyze`.
#[derive(Debug, Default, ToSchema)]
pub struct AnalyzeForm {
    /// `text` (default), `url`, `file` or `rss`.
    pub input_method: Option<String>,
    pub direct_text: Option<String>,
    pub url: Option<String>,
    pub rss_url: Option<String>,
    pub article_index: Option<String>,
    /// A `.txt` or `.pdf` file.
    #[schema(value_type = Option<String>, format = Binary)]
    pub file: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl AnalyzeForm {
    pub fn into_request(self) -> Result<AnalysisRequest, String> {
        let kind: SourceKind = self.input_method.as_deref().unwrap_or_default().parse()?;
        match kind {
            SourceKind::Text => Ok(AnalysisRequest::Text(self.direct_text.unwrap_or_default())),
            SourceKind::Url => Ok(AnalysisRequest::Url(required(self.url, "url")?)),
            SourceKind::File => {
                let file = self.file.unwrap_or(UploadedFile {
                    file_name: String::new(),
                    bytes: Bytes::new(),
                });
                Ok(AnalysisRequest::File {
                    file_name: file.file_name,
                    bytes: file.bytes,
                })
            }
            SourceKind::Rss => Ok(AnalysisRequest::Rss {
                feed_url: required(self.rss_url, "rss_url")?,
                article_index: self.article_index.filter(|raw| !raw.trim().is_empty()),
            }),
        }
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{field} is required for this input method"))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedArticlesRequest {
    pub rss_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedArticlesResponse {
    pub feed_url: String,
    pub articles: Vec<FeedArticle>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PopularFeedsResponse {
    pub categories: Vec<FeedCategory>,
}

/// Either a finished analysis or, for a feed without a chosen article, the
/// articles to choose from. Tagged by `mode`.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalyzeResponse {
    Analysis(Box<AnalysisResult>),
    ArticleSelection {
        feed_url: String,
        articles: Vec<FeedArticle>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults_to_text() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"text": "some text"}"#).unwrap();
        assert!(matches!(
            request.into_request(),
            Ok(AnalysisRequest::Text(text)) if text == "some text"
        ));
    }

    #[test]
    fn test_json_article_index_accepts_numbers_and_strings() {
        for body in [
            r#"{"input_method": "rss", "rss_url": "https://e.com/feed", "article_index": 2}"#,
            r#"{"input_method": "rss", "rss_url": "https://e.com/feed", "article_index": "2"}"#,
        ] {
            let request: AnalyzeRequest = serde_json::from_str(body).unwrap();
            assert!(matches!(
                request.into_request(),
                Ok(AnalysisRequest::Rss { article_index: Some(index), .. }) if index == "2"
            ));
        }
    }

    #[test]
    fn test_json_url_mode_requires_url() {
        let request = AnalyzeRequest {
            input_method: Some("url".to_string()),
            url: Some("   ".to_string()),
            ..AnalyzeRequest::default()
        };
        assert!(request.into_request().is_err());
    }

    #[test]
    fn test_json_rejects_file_mode() {
        let request = AnalyzeRequest {
            input_method: Some("file".to_string()),
            ..AnalyzeRequest::default()
        };
        assert!(request.into_request().unwrap_err().contains("multipart"));
    }

    #[test]
    fn test_form_file_mode_without_file() {
        let form = AnalyzeForm {
            input_method: Some("file".to_string()),
            ..AnalyzeForm::default()
        };
        assert!(matches!(
            form.into_request(),
            Ok(AnalysisRequest::File { file_name, .. }) if file_name.is_empty()
        ));
    }

    #[test]
    fn test_form_blank_index_lists_articles() {
        let form = AnalyzeForm {
            input_method: Some("rss".to_string()),
            rss_url: Some("https://e.com/feed".to_string()),
            article_index: Some(" ".to_string()),
            ..AnalyzeForm::default()
        };
        assert!(matches!(
            form.into_request(),
            Ok(AnalysisRequest::Rss { article_index: None, .. })
        ));
    }
}
