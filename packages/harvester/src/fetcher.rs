//! Content fetching - the network seam of the pipeline.
//!
//! `PageFetcher` is the trait boundary the orchestrator depends on,
//! so runs can be driven by the real `HttpFetcher` or by the mock in
//! [`crate::testing`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

/// Raw bytes retrieved for one source URL, plus transport metadata.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// Response body as text
    pub body: String,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header if present
    pub content_type: Option<String>,

    /// When the response arrived
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a fetched page with minimal fields.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            status: 200,
            content_type: None,
            fetched_at: Utc::now(),
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Trait for fetching one source URL.
///
/// A fetch is a single request: no retries, no redirect handling
/// beyond what the transport does automatically, and no shared-state
/// mutation.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL, classifying every failure as a [`FetchError`].
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}

/// HTTP fetcher with identifying headers and a fixed deadline.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher whose requests are bounded by `timeout`.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: user_agent.into(),
        }
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        if url::Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, "Fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.5")
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Network {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        debug!(url = %url, bytes = body.len(), status = status.as_u16(), "Fetch complete");

        let mut page = FetchedPage::new(url, body);
        page.status = status.as_u16();
        page.content_type = content_type;
        Ok(page)
    }
}
