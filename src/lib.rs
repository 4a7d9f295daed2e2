#[cfg(test)]
mod tests;

pub mod analysis_core;
pub mod catalog;
pub mod config;
pub mod fetch_core;
pub mod reports;

pub use analysis_core::{AggregationEngine, ChainTraverser, SourceSet};
pub use catalog::EntityResolver;
pub use config::{CatalogConfig, ConfigError};
pub use fetch_core::{HttpTransport, ResilientFetcher, RetryPolicy};
pub use reports::CatalogReport;
