use super::retry::RetryPolicy;
use super::transport::{FetchOutcome, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Resilient single-resource GET
///
/// Tries up to `policy.max_attempts()` times. Transport failures are logged
/// and followed by the policy's backoff; non-2xx statuses are retried
/// right away. Both kinds collapse to `None` once the tries run out.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn Transport + Send + Sync>,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetch a resource as raw JSON
    pub async fn fetch(&self, url: &str) -> Option<Value> {
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            match self.transport.get(url).await {
                FetchOutcome::Success(body) => return Some(body),
                // Non-2xx: retried right away
                FetchOutcome::LogicalFailure(_) => {}
                FetchOutcome::TransportFailure(e) => {
                    log::warn!(
                        "⚠️  Request to {} failed: {}, retrying... (attempt {}/{})",
                        url,
                        e,
                        attempt,
                        max_attempts
                    );
                    self.policy.wait_after(attempt).await;
                }
            }
        }

        log::debug!("❌ Giving up on {} after {} attempts", url, max_attempts);
        None
    }

    /// Fetch a resource and deserialize it into `T`
    ///
    /// A 2xx body with the wrong shape is treated as absent.
    pub async fn fetch_as<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let body = self.fetch(url).await?;

        match serde_json::from_value(body) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("⚠️  Unexpected response shape from {}: {}", url, e);
                None
            }
        }
    }
}
