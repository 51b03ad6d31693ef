use anyhow::Result;
use chrono::Utc;

use dailybrief_core::{
    config::AppConfig,
    digest::{render, HeadlineSelector},
    feed::FeedFetcher,
};

pub async fn run(config: &AppConfig) -> Result<()> {
    let fetcher = FeedFetcher::new(&config.fetch)?;
    let selector = HeadlineSelector::new(&config.digest, &fetcher);

    let digest = selector.build_digest(Utc::now()).await;

    println!("{}", render(&digest, &config.digest.label));

    Ok(())
}
