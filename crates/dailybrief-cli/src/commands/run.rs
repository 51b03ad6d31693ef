use anyhow::Result;
use chrono::Utc;

use dailybrief_core::{
    config::AppConfig,
    digest::{render, HeadlineSelector},
    feed::FeedFetcher,
    webhook::WebhookClient,
};

pub async fn run(config: &AppConfig) -> Result<()> {
    // Fail on missing webhook config before any network activity
    let webhook_url = AppConfig::webhook_url_from_env()?;

    let fetcher = FeedFetcher::new(&config.fetch)?;
    let selector = HeadlineSelector::new(&config.digest, &fetcher);

    tracing::info!(
        "Building digest for {} categories",
        config.digest.categories.len()
    );
    let digest = selector.build_digest(Utc::now()).await;
    let text = render(&digest, &config.digest.label);

    let webhook = WebhookClient::new(webhook_url, config.fetch.request_timeout_secs)?;
    webhook.post(&text).await?;

    println!("Digest posted.");

    Ok(())
}
