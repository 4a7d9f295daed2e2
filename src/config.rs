use crate::fetch_core::RetryPolicy;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub max_attempts: u32,
    pub backoff_ms: u64,
    pub jitter_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: 3,
            backoff_ms: 1_000,
            jitter_ms: 0,
            timeout_secs: 10,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `POKEAPI_BASE_URL` (default: https://pokeapi.co/api/v2)
    /// - `FETCH_MAX_ATTEMPTS` (default: 3)
    /// - `FETCH_BACKOFF_MS` (default: 1000)
    /// - `FETCH_JITTER_MS` (default: 0)
    /// - `FETCH_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = env::var("POKEAPI_BASE_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "POKEAPI_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        let max_attempts = env::var("FETCH_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_attempts);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "FETCH_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            max_attempts,
            backoff_ms: env::var("FETCH_BACKOFF_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.backoff_ms),
            jitter_ms: env::var("FETCH_JITTER_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jitter_ms),
            timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.backoff_ms),
            Duration::from_millis(self.jitter_ms),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
