use readability::extractor;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::extractor::boilerplate::strip_boilerplate;
use crate::extractor::model::{ExtractionMethod, ReadabilityResult, normalize_whitespace};

/// Structured extraction below this many characters is considered a miss and
/// the paragraph fallback is tried instead.
const MIN_STRUCTURED_CHARS: usize = 200;
const MIN_DENSE_BLOCK_PARAGRAPHS: usize = 3;

/// Elements whose text never belongs to the article body.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "menu", "form",
    "button", "svg",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "br", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "pre", "tr", "figcaption",
];

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[role='main']",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".story-body",
    ".post-body",
    ".content",
    "main",
];

pub fn extract(html: &str, url: &Url) -> Option<ReadabilityResult> {
    let document = Html::parse_document(html);
    let title = extract_title(&document);

    // Try readability first
    if let Ok(article) = extractor::extract(&mut html.as_bytes(), url) {
        let text = clean(&article.text);
        if text.chars().count() >= MIN_STRUCTURED_CHARS {
            let title = Some(article.title)
                .filter(|t| !t.trim().is_empty())
                .or(title);
            return Some(ReadabilityResult {
                title,
                text,
                method: ExtractionMethod::Readability,
            });
        }
    }

    // Fallback to basic scraping if readability fails or comes back thin
    fallback_extract(&document, title)
}

fn clean(text: &str) -> String {
    strip_boilerplate(&normalize_whitespace(text))
}

fn fallback_extract(document: &Html, title: Option<String>) -> Option<ReadabilityResult> {
    let (text, method) = extract_by_selectors(document)
        .map(|text| (text, ExtractionMethod::ContentSelectors))
        .or_else(|| extract_dense_block(document).map(|text| (text, ExtractionMethod::DenseBlock)))
        .unwrap_or_else(|| (extract_paragraphs(document), ExtractionMethod::Paragraphs));

    if text.trim().is_empty() {
        return None;
    }

    Some(ReadabilityResult {
        title,
        text,
        method,
    })
}

fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["meta[property='og:title']", "title", "h1"] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let title = match element.value().attr("content") {
                Some(content) => content.trim().to_string(),
                None => element.text().collect::<String>().trim().to_string(),
            };
            if !title.is_empty() {
                return Some(title);
            }
        }
    }

    None
}

fn extract_by_selectors(document: &Html) -> Option<String> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let text = document
            .select(&selector)
            .map(visible_text)
            .collect::<Vec<_>>()
            .join("\n");
        let text = clean(&text);
        if text.chars().count() > MIN_STRUCTURED_CHARS {
            return Some(text);
        }
    }

    None
}

/// The `div` holding the most paragraphs, when it holds enough of them.
fn extract_dense_block(document: &Html) -> Option<String> {
    let div_selector = Selector::parse("div").ok()?;
    let p_selector = Selector::parse("p").ok()?;

    let (best, count) = document
        .select(&div_selector)
        .map(|div| (div, div.select(&p_selector).count()))
        .max_by_key(|(_, count)| *count)?;

    if count < MIN_DENSE_BLOCK_PARAGRAPHS {
        return None;
    }

    let text = clean(&visible_text(best));
    (!text.is_empty()).then_some(text)
}

fn extract_paragraphs(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    let paragraphs = document
        .select(&selector)
        .map(visible_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    clean(&paragraphs)
}

/// Text of an element, skipping non-content subtrees and putting line breaks
/// between block-level elements.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_visible_text(element, &mut out);
    out
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_TAGS.contains(&name) {
                continue;
            }
            let is_block = BLOCK_TAGS.contains(&name);
            if is_block {
                out.push('\n');
            }
            push_visible_text(child_element, out);
            if is_block {
                out.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(n: usize) -> String {
        format!(
            "<p>Paragraph {n} explains how the regional rail network expanded its service to the northern valleys this spring.</p>"
        )
    }

    #[test]
    fn test_title_prefers_og_title() {
        let html = r#"<html><head><meta property="og:title" content="OG Title"><title>Doc Title</title></head><body></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), Some("OG Title".to_string()));
    }

    #[test]
    fn test_visible_text_skips_scripts_and_nav() {
        let html = r#"<html><body><div id="x"><nav>Home About</nav><p>Kept text</p><script>var a = 1;</script></div></body></html>"#;
        let document = Html::parse_document(html);
        let selector = Selector::parse("#x").unwrap();
        let element = document.select(&selector).next().unwrap();
        let text = visible_text(element);
        assert!(text.contains("Kept text"));
        assert!(!text.contains("Home About"));
        assert!(!text.contains("var a"));
    }

    #[test]
    fn test_selector_strategy() {
        let html = format!(
            "<html><body><nav>Site navigation links</nav><div class=\"story-body\">{}{}</div></body></html>",
            paragraph(1),
            paragraph(2)
        );
        let document = Html::parse_document(&html);
        let result = fallback_extract(&document, None).unwrap();
        assert_eq!(result.method, ExtractionMethod::ContentSelectors);
        assert!(result.text.contains("Paragraph 1"));
        assert!(result.text.contains("Paragraph 2"));
        assert!(!result.text.contains("Site navigation"));
    }

    #[test]
    fn test_dense_block_strategy() {
        let html = format!(
            "<html><body><div class=\"wrapper\"><div>{}{}{}</div></div><div><p>Sidebar blurb that is long enough.</p></div></body></html>",
            paragraph(1),
            paragraph(2),
            paragraph(3)
        );
        let document = Html::parse_document(&html);
        let result = fallback_extract(&document, None).unwrap();
        assert_eq!(result.method, ExtractionMethod::DenseBlock);
        assert!(result.text.contains("Paragraph 3"));
    }

    #[test]
    fn test_paragraph_strategy() {
        let html = format!("<html><body>{}<span>stray</span></body></html>", paragraph(1));
        let document = Html::parse_document(&html);
        let result = fallback_extract(&document, None).unwrap();
        assert_eq!(result.method, ExtractionMethod::Paragraphs);
        assert!(result.text.starts_with("Paragraph 1"));
        assert!(!result.text.contains("stray"));
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        let document = Html::parse_document("<html><body><script>x()</script></body></html>");
        assert!(fallback_extract(&document, None).is_none());
    }
}
