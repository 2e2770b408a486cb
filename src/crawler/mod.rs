//! Crawler module: page fetching, link extraction, and scheduling
//!
//! This module contains the two traversal engines of the crate: the per-site
//! breadth-first page crawler and the cross-site scheduler that runs a
//! bounded pool of them over a shared frontier.

mod extract;
mod fetcher;
mod scheduler;
mod site;

pub use extract::{extract_links, ExtractedLink, LinkScope};
pub use fetcher::{build_request, fetch_page, FetchResult, CONNECT_TIMEOUT, IO_TIMEOUT};
pub use scheduler::{PendingSite, Scheduler};
pub use site::SiteCrawler;

use crate::config::Config;
use crate::output::{ConsoleReport, CrawlSummary};
use std::sync::Arc;

/// Runs a complete crawl with console reporting
///
/// This is the main entry point for a configured crawl: it seeds the
/// scheduler from the configuration, runs it to completion, and returns the
/// run summary.
///
/// # Example
///
/// ```no_run
/// use crawlspan::config::load_config;
/// use crawlspan::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let summary = crawl(config).await;
/// println!("{} sites crawled", summary.sites_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> CrawlSummary {
    let scheduler = Scheduler::new(config, Arc::new(ConsoleReport::new()));
    scheduler.run().await
}
