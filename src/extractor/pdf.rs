use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::extractor::model::normalize_whitespace;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("unreadable pdf: {0}")]
    Unreadable(String),

    #[error("pdf extraction aborted: {0}")]
    Aborted(String),
}

/// Extract the text layer of a PDF held in memory.
///
/// Parsing is CPU-bound, so it runs on the blocking pool. The parser is known
/// to panic on some malformed files; such a panic surfaces as `Aborted`.
#[instrument(skip_all, fields(bytes = bytes.len()))]
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, PdfError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            warn!(error = %e, "pdf extraction task failed");
            PdfError::Aborted(e.to_string())
        })?
        .map_err(|e| PdfError::Unreadable(e.to_string()))?;

    let text = normalize_whitespace(&extracted);
    info!(chars = text.chars().count(), "extracted pdf text");
    Ok(text)
}
