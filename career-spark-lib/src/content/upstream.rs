use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::QuotesConfig;
use crate::error::{GateError, Result};

/// HTTP client for an external quote service.
///
/// Any failure (connect error, timeout, non-2xx status, unexpected body)
/// yields `None` so the caller can serve a built-in quote instead.
#[derive(Debug, Clone)]
pub struct UpstreamQuotes {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamQuote {
    content: String,
    author: String,
}

impl UpstreamQuotes {
    /// Build a client when `upstream_url` is configured.
    pub fn from_config(config: &QuotesConfig) -> Result<Option<Self>> {
        let Some(url) = &config.upstream_url else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout_ms))
            .build()
            .map_err(|e| GateError::Http(format!("Failed to build quote client: {e}")))?;
        Ok(Some(Self { client, url: url.clone() }))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch one quote, formatted as `"content" - author`.
    pub async fn fetch(&self) -> Option<String> {
        let resp = match self.client.get(&self.url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url = %self.url, error = %e, "quote upstream unreachable");
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            debug!(url = %self.url, %status, "quote upstream returned non-success status");
            return None;
        }

        match resp.json::<UpstreamQuote>().await {
            Ok(quote) => Some(format!("\"{}\" - {}", quote.content, quote.author)),
            Err(e) => {
                warn!(url = %self.url, error = %e, "quote upstream returned an unexpected body");
                None
            }
        }
    }
}
