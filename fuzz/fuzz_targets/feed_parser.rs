#![no_main]

use libfuzzer_sys::fuzz_target;

use newslens::feeds::{MAX_ARTICLES, parse_articles};

fuzz_target!(|data: &[u8]| {
    if let Ok(articles) = parse_articles(data, MAX_ARTICLES) {
        assert!(!articles.is_empty() && articles.len() <= MAX_ARTICLES);
        assert!(articles.iter().enumerate().all(|(i, a)| a.index == i));
    }
});
