pub mod boilerplate;
pub mod language;
pub mod model;
pub mod pdf;
pub mod reader;
pub mod text;

#[cfg(test)]
mod tests;

pub use model::{ExtractedPage, ExtractionMethod};

use crate::fetcher::types::PageResponse;

/// Article text of a fetched HTML page, or `None` when nothing readable is left
/// after boilerplate removal.
pub fn extract(resp: &PageResponse) -> Option<ExtractedPage> {
    let result = reader::extract(&resp.body_utf8, &resp.url_final)?;

    if result.text.trim().is_empty() {
        return None;
    }

    Some(ExtractedPage {
        url: resp.url_final.clone(),
        title: result.title,
        text: result.text,
        method: result.method,
    })
}
