//! HTTP client for eBay item pages using wreq for browser emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Desktop Chrome user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Referer used when the target URL has no recognizable host.
pub const DEFAULT_REFERER: &str = "https://www.ebay.com/";

/// Trait for fetching item pages - enables mocking for tests.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetches the page at `url`.
    ///
    /// Returns `Ok(None)` when the server answered with a non-success
    /// status; transport failures are errors.
    async fn fetch(&self, url: &str) -> Result<Option<String>>;
}

/// Result of a single request attempt.
enum Attempt {
    Body(String),
    Status(u16),
}

/// eBay HTTP client with browser-like headers and an optional retry policy.
pub struct EbayClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    retries: u32,
    retry_delay_ms: u64,
}

impl EbayClient {
    /// Creates a new client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    /// Performs one GET request.
    async fn get(&self, url: &str) -> Result<Attempt> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", USER_AGENT)
            .header("Referer", site_root(url))
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Ok(Attempt::Status(status.as_u16()));
        }

        let body = response.text().await.context("Failed to read response body")?;
        Ok(Attempt::Body(body))
    }

    /// Adds the configured delay plus random jitter.
    async fn delay(&self) {
        if self.delay_ms == 0 && self.delay_jitter_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }

    async fn backoff(&self) {
        if self.retry_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.retry_delay_ms)).await;
        }
    }
}

#[async_trait]
impl ItemSource for EbayClient {
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        info!("Fetching item: {}", url);

        let mut attempt = 0;
        loop {
            attempt += 1;

            match self.get(url).await {
                Ok(Attempt::Body(body)) => return Ok(Some(body)),
                Ok(Attempt::Status(status)) if is_retryable(status) && attempt <= self.retries => {
                    warn!("Status {} from {} (attempt {}), retrying", status, url, attempt);
                }
                Ok(Attempt::Status(status)) => {
                    warn!("Request to {} failed with status: {}", url, status);
                    return Ok(None);
                }
                Err(e) if attempt <= self.retries => {
                    warn!("Request to {} failed (attempt {}): {:#}, retrying", url, attempt, e);
                }
                Err(e) => return Err(e),
            }

            self.backoff().await;
        }
    }
}

/// Server-side or throttling statuses worth another attempt.
fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Returns `scheme://host/` for `url`, used as the Referer.
pub fn site_root(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return DEFAULT_REFERER.to_string();
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if scheme.is_empty() || host.is_empty() {
        return DEFAULT_REFERER.to_string();
    }

    format!("{}://{}/", scheme, host)
}
