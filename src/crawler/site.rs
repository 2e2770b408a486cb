//! Per-site breadth-first page crawler
//!
//! One `SiteCrawler` owns one host's traversal: a FIFO frontier of pending
//! page paths, the set of paths already discovered, and the set of external
//! hostnames already seen. Pages are fetched one at a time over fresh
//! connections, so nothing here is shared across workers and no locking is
//! needed.

use crate::crawler::extract::{extract_links, LinkScope};
use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::output::SiteStats;
use crate::CrawlError;
use std::collections::{HashSet, VecDeque};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::lookup_host;
use tokio::time::sleep;

/// Every crawl starts from the root path
const SEED_PATH: &str = "/";

/// Crawls the pages of a single site
pub struct SiteCrawler {
    hostname: String,
    addr: SocketAddr,
    page_limit: i64,
    crawl_delay: Duration,
    pending_pages: VecDeque<String>,
    discovered_pages: HashSet<String>,
    discovered_sites: HashSet<String>,
}

impl SiteCrawler {
    /// Creates a crawler for a hostname, resolving it to an address
    ///
    /// Resolution failure is the one fatal error a site crawl can raise; the
    /// scheduler catches it at the worker boundary.
    ///
    /// # Arguments
    ///
    /// * `hostname` - The site to crawl
    /// * `port` - TCP port to connect to
    /// * `page_limit` - Maximum fetch attempts, `-1` for unlimited
    /// * `crawl_delay` - Pause before every fetch except the first
    pub async fn new(
        hostname: &str,
        port: u16,
        page_limit: i64,
        crawl_delay: Duration,
    ) -> crate::Result<Self> {
        let mut addrs = lookup_host((hostname, port))
            .await
            .map_err(|e| CrawlError::Resolve {
                hostname: hostname.to_string(),
                source: e,
            })?;
        let addr = addrs.next().ok_or_else(|| CrawlError::NoAddress {
            hostname: hostname.to_string(),
        })?;

        Ok(Self::with_addr(hostname, addr, page_limit, crawl_delay))
    }

    /// Creates a crawler that connects to a known address
    pub fn with_addr(
        hostname: &str,
        addr: SocketAddr,
        page_limit: i64,
        crawl_delay: Duration,
    ) -> Self {
        let mut pending_pages = VecDeque::new();
        pending_pages.push_back(SEED_PATH.to_string());
        let mut discovered_pages = HashSet::new();
        discovered_pages.insert(SEED_PATH.to_string());

        Self {
            hostname: hostname.to_string(),
            addr,
            page_limit,
            crawl_delay,
            pending_pages,
            discovered_pages,
            discovered_sites: HashSet::new(),
        }
    }

    /// Runs the traversal to completion and returns the site's statistics
    ///
    /// Per-page failures are recorded and never retried; the loop ends when
    /// the page frontier drains or the page limit is reached.
    pub async fn crawl(mut self) -> SiteStats {
        let mut stats = SiteStats::new(&self.hostname);

        while let Some(path) = self.next_page(&stats) {
            // Courtesy pacing; the first request goes out immediately
            if path != SEED_PATH {
                sleep(self.crawl_delay).await;
            }

            let url = format!("{}{}", self.hostname, path);
            match fetch_page(self.addr, &self.hostname, &path).await {
                FetchResult::Received {
                    body,
                    response_time_ms,
                } => {
                    tracing::debug!("Fetched {} in {:.2}ms", url, response_time_ms);
                    stats.record_success(url, response_time_ms);
                    self.collect_links(&body, &mut stats);
                }
                FetchResult::Failed { reason } => {
                    tracing::debug!("Fetch of {} failed: {}", url, reason);
                    stats.record_failure(url);
                }
            }
        }

        stats.finalize();
        stats
    }

    /// Dequeues the next path, honoring the page limit
    fn next_page(&mut self, stats: &SiteStats) -> Option<String> {
        if self.page_limit >= 0 && stats.pages_attempted() >= self.page_limit as usize {
            return None;
        }
        self.pending_pages.pop_front()
    }

    /// Feeds extracted links into the page frontier and the linked-site set
    fn collect_links(&mut self, body: &str, stats: &mut SiteStats) {
        for link in extract_links(body) {
            match link.scope(&self.hostname) {
                LinkScope::Internal => {
                    if self.discovered_pages.insert(link.path.clone()) {
                        self.pending_pages.push_back(link.path);
                    }
                }
                LinkScope::External => {
                    if self.discovered_sites.insert(link.hostname.clone()) {
                        stats.linked_sites.push(link.hostname);
                    }
                }
            }
        }
    }
}
