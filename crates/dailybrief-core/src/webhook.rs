use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::{Error, Result};

const ERROR_BODY_PREVIEW: usize = 200;

/// Body of the outbound webhook call
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub content: &'a str,
}

/// Posts one rendered digest to a Discord-style webhook
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(Error::Http)?;
        Ok(Self { client, url })
    }

    /// Send the rendered text as `{"content": ...}`. Any non-2xx response
    /// is a hard error; there is no retry and no chunking for oversized
    /// payloads.
    pub async fn post(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Webhook {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        tracing::info!("Digest delivered ({} chars)", content.len());
        Ok(())
    }
}

fn preview(body: &str) -> String {
    let mut end = body.len().min(ERROR_BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
