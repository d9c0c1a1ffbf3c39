//! Plain-text helpers shared by the extraction and analysis stages.

use linkify::{LinkFinder, LinkKind};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use crate::extractor::model::collapse_whitespace;

static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

fn link_finder() -> LinkFinder {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url, LinkKind::Email]);
    finder
}

/// Replace URLs with `[URL]` and e-mail addresses with `[EMAIL]`.
pub fn mask_links(text: &str) -> String {
    link_finder()
        .spans(text)
        .map(|span| match span.kind() {
            Some(LinkKind::Url) => "[URL]",
            Some(LinkKind::Email) => "[EMAIL]",
            _ => span.as_str(),
        })
        .collect()
}

/// Drop URLs and e-mail addresses entirely.
pub fn strip_links(text: &str) -> String {
    link_finder()
        .spans(text)
        .filter(|span| span.kind().is_none())
        .map(|span| span.as_str())
        .collect()
}

/// Letters only: links, digits and punctuation removed, whitespace collapsed.
pub fn letters_only(text: &str) -> String {
    let text = strip_links(text);
    let text = DIGITS_REGEX.replace_all(&text, "");
    let text = NON_WORD_REGEX.replace_all(&text, " ");
    collapse_whitespace(&text)
}

/// Text content of an HTML fragment such as a feed entry body.
pub fn html_fragment_to_text(fragment: &str) -> String {
    if !fragment.contains('<') {
        return collapse_whitespace(fragment);
    }

    let document = Html::parse_fragment(fragment);
    let mut text = String::new();
    for node in document.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let inside_code = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !inside_code {
            text.push_str(chunk);
            text.push(' ');
        }
    }

    collapse_whitespace(&text)
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
