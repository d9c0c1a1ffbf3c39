pub mod resolver;
pub mod types;

pub use resolver::{MAX_TEXT_CHARS, MAX_UPLOAD_BYTES, MIN_TEXT_CHARS, list_feed_articles, resolve};
pub use types::{AnalysisRequest, ExtractedDocument, Resolution, SourceInfo, SourceKind};
