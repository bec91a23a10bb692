use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::models::FundamentalsRecord;

pub mod yahoo_client;
pub use yahoo_client::YahooClient;

/// Why fundamentals for a ticker could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {ticker} failed: {source}")]
    Http {
        ticker: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned HTTP {status} for {ticker}")]
    Status { ticker: String, status: u16 },

    #[error("provider error for {ticker} ({code}): {description}")]
    Provider {
        ticker: String,
        code: String,
        description: String,
    },

    #[error("no fundamentals returned for {0}")]
    NotFound(String),

    #[error("failed to parse response for {ticker}: {message}")]
    Parse { ticker: String, message: String },
}

/// Source of fundamentals for the screener.
///
/// Implementations return an error value rather than logging; the caller
/// decides how a failed ticker is reported.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    async fn fetch_fundamentals(&self, ticker: &str) -> Result<FundamentalsRecord, FetchError>;
}

/// Simple rate limiter for API requests.
///
/// Spaces consecutive requests at least `60s / requests_per_minute` apart. The
/// first request goes out immediately; zero disables pacing.
pub struct ApiRateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ApiRateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let delay = if requests_per_minute > 0 {
            Duration::from_millis(60_000 / requests_per_minute as u64)
        } else {
            Duration::ZERO
        };

        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
