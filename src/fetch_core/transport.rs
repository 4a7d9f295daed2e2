//! Single-request transport seam
//!
//! A `Transport` performs exactly one GET and reports what happened as a
//! tagged `FetchOutcome`. It never retries; that is the fetcher's job.
//!
//! ## Outcomes
//!
//! - `Success` - transport completed and status was 2xx, body parsed as JSON
//! - `LogicalFailure` - transport completed with a non-2xx status
//! - `TransportFailure` - timeout, connection error, or unreadable body

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Outcome of one try against a resource
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Value),
    LogicalFailure(StatusCode),
    TransportFailure(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Trait for performing a single GET against an absolute URL
#[async_trait]
pub trait Transport {
    async fn get(&self, url: &str) -> FetchOutcome;
}

/// `reqwest`-backed transport with a per-request timeout
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::TransportFailure(e.into()),
        };

        if !response.status().is_success() {
            return FetchOutcome::LogicalFailure(response.status());
        }

        match response.json::<Value>().await {
            Ok(body) => FetchOutcome::Success(body),
            Err(e) => FetchOutcome::TransportFailure(e.into()),
        }
    }
}
