use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use tracing::{debug, info, instrument};

use crate::extractor::text::html_fragment_to_text;
use crate::feeds::types::{FeedArticle, FeedError};
use crate::fetcher::fetch_feed;

pub const MAX_ARTICLES: usize = 20;
const UNTITLED: &str = "No Title";

/// Fetch a feed and return its first articles that carry any text.
#[instrument(skip_all, fields(feed_url = %feed_url))]
pub async fn get_feed_articles(feed_url: &str) -> Result<Vec<FeedArticle>, FeedError> {
    let response = fetch_feed(feed_url).await?;
    // The parser honours the XML encoding declaration itself.
    let articles = parse_articles(&response.body_raw, MAX_ARTICLES)?;
    info!(count = articles.len(), "parsed feed articles");
    Ok(articles)
}

/// Parse RSS, Atom or JSON Feed bytes into at most `max_articles` articles.
pub fn parse_articles(body: &[u8], max_articles: usize) -> Result<Vec<FeedArticle>, FeedError> {
    let feed = feed_rs::parser::parse(body).map_err(|e| FeedError::Parse(e.to_string()))?;

    let articles: Vec<FeedArticle> = feed
        .entries
        .into_iter()
        .filter_map(to_article)
        .take(max_articles)
        .enumerate()
        .map(|(index, article)| FeedArticle { index, ..article })
        .collect();

    if articles.is_empty() {
        return Err(FeedError::Empty);
    }

    Ok(articles)
}

fn to_article(entry: Entry) -> Option<FeedArticle> {
    let summary = entry
        .summary
        .as_ref()
        .map(|text| html_fragment_to_text(&text.content))
        .unwrap_or_default();
    let content = entry
        .content
        .as_ref()
        .and_then(|content| content.body.as_deref())
        .map(html_fragment_to_text)
        .unwrap_or_default();

    if summary.is_empty() && content.is_empty() {
        debug!(entry_id = %entry.id, "skipping entry without text");
        return None;
    }

    let title = entry
        .title
        .as_ref()
        .map(|text| html_fragment_to_text(&text.content))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    Some(FeedArticle {
        index: 0,
        title,
        link: entry
            .links
            .first()
            .map(|link| link.href.clone())
            .unwrap_or_default(),
        summary,
        content,
        published: entry.published.or(entry.updated).map(format_published),
        author: entry
            .authors
            .first()
            .map(|person| person.name.trim().to_string())
            .filter(|name| !name.is_empty()),
        tags: entry
            .categories
            .into_iter()
            .map(|category| category.term)
            .filter(|term| !term.trim().is_empty())
            .collect(),
    })
}

fn format_published(published: DateTime<Utc>) -> String {
    published.format("%Y-%m-%d %H:%M:%S").to_string()
}
