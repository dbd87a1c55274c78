use crate::types::{FetchConfig, Result, TickerError};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Retrieves raw feed bytes for a source URL. Failures are per-source;
/// the orchestrator records them and moves on. Implementations must bound
/// their own latency (timeouts), since nothing in the core cancels a
/// hung retrieval.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
    config: FetchConfig,
}

impl HttpTransport {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client, config })
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TickerError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(len) = response.content_length() {
            if len as usize > self.config.max_feed_size_bytes {
                return Err(TickerError::FeedTooLarge { size: len as usize });
            }
        }

        let body = response.text().await?;
        if body.len() > self.config.max_feed_size_bytes {
            return Err(TickerError::FeedTooLarge { size: body.len() });
        }
        Ok(body)
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 8),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.timeout_seconds * 2)),
            ..Default::default()
        };

        let mut last_error = None;
        for attempt in 0..=self.config.max_retries {
            debug!(url, attempt, "fetching feed");
            match self.fetch_once(url).await {
                Ok(body) => {
                    info!(url, bytes = body.len(), "feed fetched");
                    return Ok(body);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!(url, attempt = attempt + 1, ?delay, "fetch failed, retrying");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| TickerError::General("fetch failed".to_string())))
    }
}
