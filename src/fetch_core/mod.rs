//! Resilient fetch layer
//!
//! - `transport` - one GET, tagged outcome, no retries
//! - `retry` - injectable retry schedule (attempts, backoff, jitter)
//! - `fetcher` - bounded retry on top of a transport

pub mod fetcher;
pub mod retry;
pub mod transport;

pub use fetcher::ResilientFetcher;
pub use retry::RetryPolicy;
pub use transport::{FetchOutcome, HttpTransport, Transport, TransportError};
