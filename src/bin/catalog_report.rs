//! Catalog Report Binary - eight canned analytics over PokeAPI
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin catalog_report
//! ```
//!
//! ## Environment Variables
//!
//! - POKEAPI_BASE_URL - API base address (default: https://pokeapi.co/api/v2)
//! - FETCH_MAX_ATTEMPTS - Tries per request (default: 3)
//! - FETCH_BACKOFF_MS - Delay after a transport failure (default: 1000)
//! - FETCH_JITTER_MS - Extra random delay on top of the backoff (default: 0)
//! - FETCH_TIMEOUT_SECS - Per-try timeout (default: 10)
//! - RUST_LOG - Logging level (optional, default: info)
//!
//! Report lines go to stdout, logs to stderr.

use pokeflow::{CatalogConfig, CatalogReport, EntityResolver, HttpTransport, ResilientFetcher};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = CatalogConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("🚀 Starting catalog report...");
    log::info!("📊 Configuration:");
    log::info!("   POKEAPI_BASE_URL: {}", config.base_url);
    log::info!(
        "   Retry: {} attempts, {}ms backoff, {}ms jitter, {}s timeout",
        config.max_attempts,
        config.backoff_ms,
        config.jitter_ms,
        config.timeout_secs
    );

    let transport = HttpTransport::new(config.timeout())?;
    let fetcher = ResilientFetcher::new(Arc::new(transport), config.retry_policy());
    let resolver = EntityResolver::new(fetcher, config.base_url.clone());

    let started = Instant::now();
    let report = CatalogReport::run(&resolver).await;

    for line in report.lines() {
        println!("{}", line);
    }

    log::info!("✅ Reports completed in {:.1}s", started.elapsed().as_secs_f64());
    Ok(())
}
