use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable carrying the webhook destination URL.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            digest: DigestConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Headline selection policy: which categories to cover, how many headlines
/// each gets, and how far back to look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Target categories, rendered in this order
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
    /// Category substituted wholesale when a target yields no headlines
    #[serde(default = "default_fallback_category")]
    pub fallback_category: CategoryConfig,
    /// Maximum headlines per category
    #[serde(default = "default_headlines_per_category")]
    pub headlines_per_category: usize,
    /// Only include entries published within this many hours
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: i64,
    /// Entries considered per feed source before moving on
    #[serde(default = "default_max_entries_per_source")]
    pub max_entries_per_source: usize,
    /// Maximum length of a headline's summary snippet
    #[serde(default = "default_max_summary_chars")]
    pub max_summary_chars: usize,
    /// Header label for the rendered digest
    #[serde(default = "default_digest_label")]
    pub label: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            fallback_category: default_fallback_category(),
            headlines_per_category: default_headlines_per_category(),
            lookback_hours: default_lookback_hours(),
            max_entries_per_source: default_max_entries_per_source(),
            max_summary_chars: default_max_summary_chars(),
            label: default_digest_label(),
        }
    }
}

/// A named topic bucket with its ordered feed sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub feeds: Vec<String>,
}

impl CategoryConfig {
    pub fn new(name: impl Into<String>, feeds: &[&str]) -> Self {
        Self {
            name: name.into(),
            feeds: feeds.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new(
            "Markets",
            &[
                "https://www.reuters.com/finance/markets/rss",
                "https://feeds.a.dj.com/rss/RSSMarketsMain.xml",
                "https://finance.yahoo.com/news/rssindex",
            ],
        ),
        CategoryConfig::new(
            "UK News",
            &[
                "https://feeds.bbci.co.uk/news/uk/rss.xml",
                "https://www.theguardian.com/uk-news/rss",
                "https://www.reuters.com/world/uk/rss",
            ],
        ),
        CategoryConfig::new(
            "Global Politics",
            &[
                "https://www.reuters.com/politics/rss",
                "https://apnews.com/hub/politics?output=rss",
                "https://feeds.bbci.co.uk/news/world/rss.xml",
            ],
        ),
        CategoryConfig::new(
            "VC/PE",
            &[
                "https://techcrunch.com/tag/funding/feed/",
                "https://feeds.feedburner.com/pehubblog",
                "https://news.crunchbase.com/feed/",
            ],
        ),
        CategoryConfig::new(
            "Insurance",
            &[
                "https://www.insurancejournal.com/rss/ijnational.rss",
                "https://www.insurancetimes.co.uk/XmlServers/navsectionrss.aspx?navsectioncode=News",
                "https://www.insurancebusinessmag.com/uk/rss/",
            ],
        ),
    ]
}

fn default_fallback_category() -> CategoryConfig {
    CategoryConfig::new(
        "Light-hearted",
        &[
            "https://www.reuters.com/lifestyle/oddly-enough/rss",
            "https://feeds.bbci.co.uk/news/newsbeat/rss.xml",
            "https://www.theguardian.com/lifeandstyle/rss",
        ],
    )
}

fn default_headlines_per_category() -> usize {
    3
}

fn default_lookback_hours() -> i64 {
    36
}

fn default_max_entries_per_source() -> usize {
    20
}

fn default_max_summary_chars() -> usize {
    520
}

fn default_digest_label() -> String {
    "Daily News Briefing".to_string()
}

fn default_timeout() -> u64 {
    20
}

impl AppConfig {
    /// Load configuration from the default path, or return defaults when no
    /// file exists.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, or return defaults when no
    /// file exists there.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Get the configuration file path
    /// Always uses ~/.config/dailybrief/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dailybrief")
            .join("config.toml")
    }

    /// Read the webhook destination URL from the environment. Missing or
    /// empty values are a fatal configuration error, checked before any
    /// network activity.
    pub fn webhook_url_from_env() -> crate::Result<String> {
        match std::env::var(WEBHOOK_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(crate::Error::Config(format!(
                "{} is not set; export the webhook destination URL before running",
                WEBHOOK_URL_ENV
            ))),
        }
    }
}
