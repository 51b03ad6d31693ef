use chrono::{DateTime, Utc};

/// A single entry pulled from a feed source, title already cleaned
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// Display title: entities unescaped, tags stripped, whitespace
    /// collapsed. Never empty.
    pub title: String,
    /// Raw summary or content body as the feed supplied it (may be HTML)
    pub summary: Option<String>,
    /// Publish time from the entry's published/updated fields, if any
    pub published_at: Option<DateTime<Utc>>,
}

/// Parsed feed data from RSS/Atom content
#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}
