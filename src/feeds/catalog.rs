use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PopularFeed {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeedCategory {
    pub category: String,
    pub feeds: Vec<PopularFeed>,
}

const CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "News",
        &[
            ("BBC News", "http://feeds.bbci.co.uk/news/rss.xml"),
            ("CNN", "http://rss.cnn.com/rss/edition.rss"),
            ("Reuters", "https://www.reuters.com/rssFeed/worldNews"),
            ("Associated Press", "https://apnews.com/apf-topnews"),
        ],
    ),
    (
        "Technology",
        &[
            ("TechCrunch", "https://techcrunch.com/feed/"),
            ("The Verge", "https://www.theverge.com/rss/index.xml"),
            ("Ars Technica", "http://feeds.arstechnica.com/arstechnica/index"),
            ("Wired", "https://www.wired.com/feed/rss"),
        ],
    ),
    (
        "Business",
        &[
            ("Wall Street Journal", "https://feeds.a.dj.com/rss/RSSWorldNews.xml"),
            ("Financial Times", "https://www.ft.com/rss"),
            ("Bloomberg", "https://feeds.bloomberg.com/markets/news.rss"),
            ("Forbes", "https://www.forbes.com/real-time/feed2/"),
        ],
    ),
    (
        "Science",
        &[
            ("Scientific American", "https://www.scientificamerican.com/xml/rss.xml"),
            ("Nature", "https://www.nature.com/nature.rss"),
            ("Science Magazine", "https://www.science.org/rss/news_current.xml"),
        ],
    ),
];

/// Well-known feeds grouped by category, in display order.
pub fn popular_feeds() -> Vec<FeedCategory> {
    CATALOG
        .iter()
        .map(|(category, feeds)| FeedCategory {
            category: category.to_string(),
            feeds: feeds
                .iter()
                .map(|(name, url)| PopularFeed {
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        })
        .collect()
}
