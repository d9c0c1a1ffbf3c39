pub mod catalog;
pub mod parser;
pub mod types;

pub use catalog::{FeedCategory, PopularFeed, popular_feeds};
pub use parser::{MAX_ARTICLES, get_feed_articles, parse_articles};
pub use types::{FeedArticle, FeedError};
