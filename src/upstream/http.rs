//! HTTP GET with a fixed retry budget
//!
//! Only transport failures (connect errors, timeouts) are retried. Any HTTP
//! status, including 4xx/5xx, counts as a response and is returned as-is.

use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Attempts per fetch
pub const MAX_ATTEMPTS: u32 = 3;

/// Per-attempt timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Backoff grows by this much per failed attempt
const BACKOFF_STEP_SECS: u64 = 3;

/// Status and body of an upstream response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A single GET attempt
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError>;
}

#[async_trait]
impl<T: HttpGet + ?Sized> HttpGet for Arc<T> {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        (**self).get(url, timeout).await
    }
}

/// `HttpGet` backed by a reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpGet for ReqwestHttp {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        // without_url: the query string carries the API key
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Delay after the failed attempt with the given 0-based index
pub fn backoff(attempt_index: u32) -> Duration {
    Duration::from_secs(u64::from(attempt_index) * BACKOFF_STEP_SECS)
}

/// Retries transport failures with linear backoff
pub struct RetryingHttpFetcher<H> {
    http: H,
    max_attempts: u32,
    timeout: Duration,
}

impl<H: HttpGet> RetryingHttpFetcher<H> {
    /// Create a fetcher with the standard budget (3 attempts, 10s each)
    pub fn new(http: H) -> Self {
        Self {
            http,
            max_attempts: MAX_ATTEMPTS,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// GET `url`, retrying transport failures.
    ///
    /// After the failed attempt `i` the task sleeps `backoff(i)`, so an
    /// exhausted fetch has slept 0s + 3s + 6s.
    pub async fn fetch(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut last = String::new();

        for attempt in 0..self.max_attempts {
            match self.http.get(url, self.timeout).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    log::warn!(
                        "upstream request attempt {}/{} failed: {}",
                        attempt + 1,
                        self.max_attempts,
                        e
                    );
                    last = e.to_string();
                    tokio::time::sleep(backoff(attempt)).await;
                }
            }
        }

        Err(FetchError::Exhausted {
            attempts: self.max_attempts,
            last,
        })
    }
}
