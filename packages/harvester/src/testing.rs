//! Testing utilities including a mock fetcher.
//!
//! Useful for driving the pipeline without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::fetcher::{FetchedPage, PageFetcher};

/// Canned response for one URL.
#[derive(Debug, Clone)]
enum MockResponse {
    /// Succeed with this body
    Page(String),
    /// Fail with this HTTP status
    Status(u16),
    /// Fail with a timeout
    Timeout,
    /// Fail with a transport error
    Unreachable,
}

/// A mock fetcher with canned per-URL responses and call tracking.
///
/// Unknown URLs fail as network errors, so tests fail loudly when
/// the pipeline fetches something unexpected.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,

    /// URLs fetched, in order, for assertions
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a successful page for a URL.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Page(body.into()));
        self
    }

    /// Fail a URL with an HTTP status.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Status(status));
        self
    }

    /// Fail a URL with a timeout.
    pub fn with_timeout(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), MockResponse::Timeout);
        self
    }

    /// Fail a URL with a transport error.
    pub fn with_unreachable(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), MockResponse::Unreachable);
        self
    }

    /// URLs fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(MockResponse::Page(body)) => {
                Ok(FetchedPage::new(url, body.clone()).with_content_type("text/html"))
            }
            Some(MockResponse::Status(status)) => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            Some(MockResponse::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            Some(MockResponse::Unreachable) | None => Err(FetchError::Network {
                url: url.to_string(),
                reason: "no canned response".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_page() {
        let fetcher = MockFetcher::new().with_page("https://example.com/a", "body text");
        let page = fetcher.fetch("https://example.com/a").await.unwrap();
        assert_eq!(page.body, "body text");
        assert_eq!(fetcher.calls(), vec!["https://example.com/a"]);
    }

    #[tokio::test]
    async fn test_canned_failures() {
        let fetcher = MockFetcher::new()
            .with_status("https://example.com/404", 404)
            .with_timeout("https://example.com/slow");

        let err = fetcher.fetch("https://example.com/404").await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));

        let err = fetcher.fetch("https://example.com/slow").await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));

        let err = fetcher.fetch("https://example.com/unknown").await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }
}
