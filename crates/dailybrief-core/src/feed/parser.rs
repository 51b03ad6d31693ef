use chrono::{DateTime, Utc};
use feed_rs::parser;

use super::models::{FeedEntry, ParsedFeed};
use crate::{Error, Result};

/// Parse RSS/Atom feed content into structured data.
///
/// Entries whose title is empty after cleanup are dropped silently.
pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let title = feed.title.map(|t| t.content);

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = clean_title(&entry.title.map(|t| t.content).unwrap_or_default());
            if title.is_empty() {
                return None;
            }

            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));

            let published_at = entry
                .published
                .or(entry.updated)
                .map(DateTime::<Utc>::from);

            Some(FeedEntry {
                title,
                summary,
                published_at,
            })
        })
        .collect();

    Ok(ParsedFeed { title, entries })
}

/// Strip markup and unescape HTML entities from a title, collapsing all
/// whitespace runs to single spaces.
pub fn clean_title(raw: &str) -> String {
    let text = html_to_text(raw);
    collapse_whitespace(&text)
}

/// Convert HTML content to plain text, without emphasis or link markers
pub fn html_to_text(html: &str) -> String {
    use html2text::render::TrivialDecorator;

    // Wide enough that titles never wrap; collapse handles any stragglers
    html2text::from_read_with_decorator(html.as_bytes(), 500, TrivialDecorator::new())
        .unwrap_or_else(|_| html.to_string())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
