use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Bounded retry schedule for a single logical GET
///
/// Fixed backoff between tries (no exponential growth), with optional
/// uniform jitter added on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
    jitter: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration, jitter: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            jitter,
        }
    }

    /// Retry schedule without any delay between tries
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the next try: the fixed backoff plus `0..=jitter`
    pub fn delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.backoff;
        }

        let extra_ms = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
        self.backoff + Duration::from_millis(extra_ms)
    }

    /// Wait before try `attempt + 1`
    ///
    /// No-op when `attempt` was the last try.
    pub async fn wait_after(&self, attempt: u32) {
        if attempt >= self.max_attempts {
            return;
        }

        let delay = self.delay();
        if !delay.is_zero() {
            log::debug!(
                "⏳ Retry attempt {} of {} in {}ms",
                attempt + 1,
                self.max_attempts,
                delay.as_millis()
            );
            sleep(delay).await;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::ZERO)
    }
}
