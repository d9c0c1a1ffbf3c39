//! Line-level boilerplate removal for text pulled out of web pages.

const MIN_LINE_CHARS: usize = 10;
const MAX_BOILERPLATE_RATIO: f64 = 0.3;

const BOILERPLATE_KEYWORDS: &[&str] = &[
    "cookie",
    "privacy",
    "terms",
    "policy",
    "gdpr",
    "consent",
    "accept",
    "decline",
    "preferences",
    "tracking",
    "advertisement",
    "subscribe",
    "newsletter",
    "login",
    "log in",
    "sign up",
    "sign in",
    "register",
    "password",
    "access denied",
    "loading",
    "please wait",
    "javascript",
    "enable",
    "browser",
    "click here",
    "read more",
    "learn more",
    "share this",
    "all rights reserved",
];

/// Drop navigation crumbs and consent/subscription noise, keeping article
/// lines in their original order.
pub fn strip_boilerplate(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .filter(|line| !is_boilerplate_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn is_boilerplate_line(line: &str) -> bool {
    let total_words = line.split_whitespace().count();
    if total_words == 0 {
        return true;
    }

    let line_lower = line.to_lowercase();
    let boilerplate_count: usize = BOILERPLATE_KEYWORDS
        .iter()
        .map(|keyword| line_lower.matches(keyword).count())
        .sum();

    boilerplate_count as f64 / total_words as f64 > MAX_BOILERPLATE_RATIO
}
