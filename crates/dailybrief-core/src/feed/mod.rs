mod fetcher;
mod models;
mod parser;

pub use fetcher::{FeedFetcher, FetchFeed};
pub use models::{FeedEntry, ParsedFeed};
pub use parser::{clean_title, collapse_whitespace, html_to_text, parse_feed};
