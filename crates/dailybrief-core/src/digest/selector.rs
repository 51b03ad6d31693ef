use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use super::models::{Digest, Headline, Section};
use super::summary::summary_snippet;
use crate::config::{CategoryConfig, DigestConfig};
use crate::feed::FetchFeed;

/// Applies the headline selection policy: recency window, case-insensitive
/// dedup, per-category quota with early exit, and whole-category fallback.
pub struct HeadlineSelector<'a> {
    config: &'a DigestConfig,
    fetcher: &'a dyn FetchFeed,
}

impl<'a> HeadlineSelector<'a> {
    pub fn new(config: &'a DigestConfig, fetcher: &'a dyn FetchFeed) -> Self {
        Self { config, fetcher }
    }

    /// Build the digest for one run: every target category in configured
    /// order, empty ones replaced wholesale by the fallback category's
    /// headlines. Categories and sources are processed strictly one at a
    /// time.
    pub async fn build_digest(&self, now: DateTime<Utc>) -> Digest {
        let mut sections = Vec::with_capacity(self.config.categories.len());
        for category in &self.config.categories {
            let headlines = self.collect_category(category, now).await;
            sections.push(Section {
                category: category.name.clone(),
                headlines,
            });
        }

        // The fallback list is computed at most once and shared by every
        // empty section
        let mut fallback: Option<Vec<Headline>> = None;
        for section in sections.iter_mut().filter(|s| s.is_empty()) {
            if fallback.is_none() {
                tracing::info!(
                    "Category '{}' is empty, substituting '{}'",
                    section.category,
                    self.config.fallback_category.name
                );
                fallback = Some(
                    self.collect_category(&self.config.fallback_category, now)
                        .await,
                );
            }
            section.headlines = fallback.clone().unwrap_or_default();
        }

        Digest {
            generated_at: now,
            sections,
        }
    }

    /// Collect up to the configured maximum of fresh, unique headlines for
    /// one category. Sources are consulted in order and skipped entirely
    /// once the quota is filled.
    pub async fn collect_category(&self, category: &CategoryConfig, now: DateTime<Utc>) -> Vec<Headline> {
        let cutoff = now - Duration::hours(self.config.lookback_hours);
        let quota = self.config.headlines_per_category;

        let mut seen = HashSet::new();
        let mut headlines = Vec::new();

        for url in &category.feeds {
            if headlines.len() >= quota {
                break;
            }

            let parsed = match self.fetcher.fetch(url).await {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Skipping source {} for '{}': {}", url, category.name, e);
                    continue;
                }
            };

            for entry in parsed
                .entries
                .into_iter()
                .take(self.config.max_entries_per_source)
            {
                // Missing timestamps count as "now" so the entry is kept
                let published_at = entry.published_at.unwrap_or(now);
                if published_at < cutoff {
                    continue;
                }

                if !seen.insert(entry.title.to_lowercase()) {
                    continue;
                }

                let summary = entry
                    .summary
                    .as_deref()
                    .and_then(|raw| summary_snippet(raw, self.config.max_summary_chars));

                headlines.push(Headline {
                    title: entry.title,
                    summary,
                    published_at,
                });

                if headlines.len() >= quota {
                    break;
                }
            }
        }

        headlines
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::feed::{FeedEntry, ParsedFeed};
    use crate::{Error, Result};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 28, 7, 0, 0).unwrap()
    }

    fn entry(title: &str, hours_ago: i64) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            summary: None,
            published_at: Some(now() - Duration::hours(hours_ago)),
        }
    }

    fn undated(title: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            summary: None,
            published_at: None,
        }
    }

    /// Serves canned entries per URL and counts fetch calls
    struct MockFetcher {
        responses: Vec<(String, Result<ParsedFeed>)>,
        calls: AtomicUsize,
    }

    impl MockFetcher {
        fn new(responses: Vec<(&str, Result<ParsedFeed>)>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|(url, r)| (url.to_string(), r))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn feed(entries: Vec<FeedEntry>) -> Result<ParsedFeed> {
            Ok(ParsedFeed {
                title: None,
                entries,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FetchFeed for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.iter().find(|(u, _)| u == url) {
                Some((_, Ok(parsed))) => Ok(parsed.clone()),
                Some((_, Err(_))) => Err(Error::FeedParse("mock failure".into())),
                None => Err(Error::FeedParse(format!("no mock for {}", url))),
            }
        }
    }

    fn category(name: &str, feeds: &[&str]) -> CategoryConfig {
        CategoryConfig::new(name, feeds)
    }

    fn test_config(categories: Vec<CategoryConfig>, fallback: CategoryConfig) -> DigestConfig {
        DigestConfig {
            categories,
            fallback_category: fallback,
            ..DigestConfig::default()
        }
    }

    #[tokio::test]
    async fn test_quota_is_filled_from_a_rich_source() {
        let fetcher = MockFetcher::new(vec![(
            "https://a.example/feed",
            MockFetcher::feed(vec![
                entry("One", 1),
                entry("Two", 2),
                entry("Three", 3),
                entry("Four", 4),
                entry("Five", 5),
            ]),
        )]);
        let config = test_config(vec![], category("Fallback", &[]));
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(&category("Markets", &["https://a.example/feed"]), now())
            .await;

        assert_eq!(got.len(), 3);
        assert_eq!(got[0].title, "One");
        assert_eq!(got[2].title, "Three");
    }

    #[tokio::test]
    async fn test_titles_differing_only_by_case_dedupe_to_one() {
        let fetcher = MockFetcher::new(vec![(
            "https://a.example/feed",
            MockFetcher::feed(vec![entry("Oil Prices Jump", 1), entry("OIL PRICES JUMP", 2)]),
        )]);
        let config = test_config(vec![], category("Fallback", &[]));
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(&category("Markets", &["https://a.example/feed"]), now())
            .await;

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "Oil Prices Jump");
    }

    #[tokio::test]
    async fn test_stale_entries_are_excluded_and_undated_kept() {
        let fetcher = MockFetcher::new(vec![(
            "https://a.example/feed",
            MockFetcher::feed(vec![
                entry("Stale story", 48),
                undated("Undated story"),
                entry("Fresh story", 2),
            ]),
        )]);
        let config = test_config(vec![], category("Fallback", &[]));
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(&category("Markets", &["https://a.example/feed"]), now())
            .await;

        let titles: Vec<&str> = got.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["Undated story", "Fresh story"]);
        // undated entries are stamped with the run time
        assert_eq!(got[0].published_at, now());
    }

    #[tokio::test]
    async fn test_dedup_spans_sources_within_a_category() {
        let fetcher = MockFetcher::new(vec![
            (
                "https://a.example/feed",
                MockFetcher::feed(vec![entry("Shared headline", 1)]),
            ),
            (
                "https://b.example/feed",
                MockFetcher::feed(vec![entry("shared headline", 2), entry("Distinct one", 3)]),
            ),
        ]);
        let config = test_config(vec![], category("Fallback", &[]));
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(
                &category(
                    "Markets",
                    &["https://a.example/feed", "https://b.example/feed"],
                ),
                now(),
            )
            .await;

        let titles: Vec<&str> = got.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["Shared headline", "Distinct one"]);
    }

    #[tokio::test]
    async fn test_early_exit_skips_remaining_sources() {
        let fetcher = MockFetcher::new(vec![
            (
                "https://a.example/feed",
                MockFetcher::feed(vec![entry("One", 1), entry("Two", 2), entry("Three", 3)]),
            ),
            (
                "https://b.example/feed",
                MockFetcher::feed(vec![entry("Never seen", 1)]),
            ),
        ]);
        let config = test_config(vec![], category("Fallback", &[]));
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(
                &category(
                    "Markets",
                    &["https://a.example/feed", "https://b.example/feed"],
                ),
                now(),
            )
            .await;

        assert_eq!(got.len(), 3);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_source_is_skipped_not_fatal() {
        let fetcher = MockFetcher::new(vec![
            ("https://a.example/feed", Err(Error::FeedParse("boom".into()))),
            (
                "https://b.example/feed",
                MockFetcher::feed(vec![entry("Still here", 1)]),
            ),
        ]);
        let config = test_config(vec![], category("Fallback", &[]));
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(
                &category(
                    "Markets",
                    &["https://a.example/feed", "https://b.example/feed"],
                ),
                now(),
            )
            .await;

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "Still here");
    }

    #[tokio::test]
    async fn test_empty_category_is_replaced_by_fallback() {
        let fetcher = MockFetcher::new(vec![
            ("https://dead.example/feed", MockFetcher::feed(vec![])),
            (
                "https://fun.example/feed",
                MockFetcher::feed(vec![entry("Duck stops traffic", 1)]),
            ),
        ]);
        let config = test_config(
            vec![category("Insurance", &["https://dead.example/feed"])],
            category("Light-hearted", &["https://fun.example/feed"]),
        );
        let selector = HeadlineSelector::new(&config, &fetcher);

        let digest = selector.build_digest(now()).await;

        assert_eq!(digest.sections.len(), 1);
        // section keeps the target category's name, fallback's headlines
        assert_eq!(digest.sections[0].category, "Insurance");
        assert_eq!(digest.sections[0].headlines.len(), 1);
        assert_eq!(digest.sections[0].headlines[0].title, "Duck stops traffic");
    }

    #[tokio::test]
    async fn test_fallback_is_computed_once_for_multiple_empty_categories() {
        let fetcher = MockFetcher::new(vec![
            ("https://dead1.example/feed", MockFetcher::feed(vec![])),
            ("https://dead2.example/feed", MockFetcher::feed(vec![])),
            (
                "https://fun.example/feed",
                MockFetcher::feed(vec![entry("Duck stops traffic", 1)]),
            ),
        ]);
        let config = test_config(
            vec![
                category("Insurance", &["https://dead1.example/feed"]),
                category("VC/PE", &["https://dead2.example/feed"]),
            ],
            category("Light-hearted", &["https://fun.example/feed"]),
        );
        let selector = HeadlineSelector::new(&config, &fetcher);

        let digest = selector.build_digest(now()).await;

        assert_eq!(digest.sections[0].headlines.len(), 1);
        assert_eq!(digest.sections[1].headlines.len(), 1);
        // two dead feeds + one fallback fetch
        assert_eq!(fetcher.call_count(), 3);
    }

    #[tokio::test]
    async fn test_per_source_entry_cap_bounds_work() {
        let entries: Vec<FeedEntry> = (0..30).map(|i| entry(&format!("T{}", i), 1)).collect();
        let fetcher = MockFetcher::new(vec![(
            "https://a.example/feed",
            MockFetcher::feed(entries),
        )]);
        let config = DigestConfig {
            headlines_per_category: 50,
            ..test_config(vec![], category("Fallback", &[]))
        };
        let selector = HeadlineSelector::new(&config, &fetcher);

        let got = selector
            .collect_category(&category("Markets", &["https://a.example/feed"]), now())
            .await;

        assert_eq!(got.len(), config.max_entries_per_source);
    }
}
