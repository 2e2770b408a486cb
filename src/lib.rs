//! Crawlspan: a breadth-first multi-site crawler
//!
//! This crate crawls websites starting from a seed list. Each site is walked
//! breadth-first over raw HTTP, outbound links are classified as internal
//! (more pages on the same host) or external (candidate sites to crawl next),
//! and per-page timing and failure statistics are aggregated. A top-level
//! scheduler bounds how many sites are crawled concurrently and expands the
//! site-to-site frontier up to a configured depth.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawlspan operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to resolve host {hostname}: {source}")]
    Resolve {
        hostname: String,
        source: std::io::Error,
    },

    #[error("No address found for host {hostname}")]
    NoAddress { hostname: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawlspan operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Scheduler};
pub use output::{ConsoleReport, CrawlSummary, PageStats, ReportSink, SiteStats};
