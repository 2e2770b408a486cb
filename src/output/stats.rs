//! Statistics types for site crawls and whole runs

use chrono::{DateTime, Utc};

/// Sentinel response time for pages that could not be fetched
pub const FAILED_RESPONSE_TIME: f64 = -1.0;

/// Timing record for a single fetch attempt
///
/// `response_time_ms` is the time from sending the request to receiving the
/// first chunk of the response, or [`FAILED_RESPONSE_TIME`] if the page could
/// not be fetched or nothing was ever received.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStats {
    pub url: String,
    pub response_time_ms: f64,
}

/// Aggregate result of one site crawl
///
/// `visited_pages` holds one entry per dequeued page task, in fetch order,
/// failed attempts included with the sentinel time. `linked_sites` holds the
/// external hostnames seen on this site, each at most once, in discovery
/// order. The min/max/average fields stay at the sentinel until at least one
/// fetch succeeds and only ever cover successful fetches.
#[derive(Debug, Clone)]
pub struct SiteStats {
    pub hostname: String,
    pub visited_pages: Vec<PageStats>,
    pub pages_failed: u32,
    pub linked_sites: Vec<String>,
    pub min_response_time: f64,
    pub max_response_time: f64,
    pub average_response_time: f64,
}

impl SiteStats {
    /// Creates an empty stats record for a hostname
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            visited_pages: Vec::new(),
            pages_failed: 0,
            linked_sites: Vec::new(),
            min_response_time: FAILED_RESPONSE_TIME,
            max_response_time: FAILED_RESPONSE_TIME,
            average_response_time: FAILED_RESPONSE_TIME,
        }
    }

    /// Records a successfully fetched page and updates the running min/max
    pub fn record_success(&mut self, url: impl Into<String>, response_time_ms: f64) {
        if self.min_response_time < 0.0 || response_time_ms < self.min_response_time {
            self.min_response_time = response_time_ms;
        }
        if self.max_response_time < 0.0 || response_time_ms > self.max_response_time {
            self.max_response_time = response_time_ms;
        }
        self.visited_pages.push(PageStats {
            url: url.into(),
            response_time_ms,
        });
    }

    /// Records a fetch attempt that produced no response
    pub fn record_failure(&mut self, url: impl Into<String>) {
        self.pages_failed += 1;
        self.visited_pages.push(PageStats {
            url: url.into(),
            response_time_ms: FAILED_RESPONSE_TIME,
        });
    }

    /// Number of fetch attempts made so far
    pub fn pages_attempted(&self) -> usize {
        self.visited_pages.len()
    }

    /// Number of attempts that received a response
    pub fn pages_succeeded(&self) -> usize {
        self.visited_pages
            .iter()
            .filter(|p| p.response_time_ms >= 0.0)
            .count()
    }

    /// Computes the average response time over successful fetches
    ///
    /// Failed attempts contribute to `pages_failed` but not to the average;
    /// the sentinel stays in place when no page ever succeeded.
    pub fn finalize(&mut self) {
        let timed: Vec<f64> = self
            .visited_pages
            .iter()
            .map(|p| p.response_time_ms)
            .filter(|t| *t >= 0.0)
            .collect();
        if !timed.is_empty() {
            self.average_response_time = timed.iter().sum::<f64>() / timed.len() as f64;
        }
    }
}

/// Summary of a whole crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Sites whose crawl completed (including all-pages-failed sites)
    pub sites_crawled: u64,

    /// Sites whose crawler could not start (e.g. host resolution failure)
    pub sites_failed: u64,

    /// Fetch attempts across all sites
    pub pages_visited: u64,

    /// Failed fetch attempts across all sites
    pub pages_failed: u64,

    /// Distinct hostnames that entered the site frontier
    pub sites_discovered: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlSummary {
    /// Creates a summary stamped with the current time
    pub fn new() -> Self {
        Self {
            sites_crawled: 0,
            sites_failed: 0,
            pages_visited: 0,
            pages_failed: 0,
            sites_discovered: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Folds one completed site crawl into the run totals
    pub fn absorb(&mut self, stats: &SiteStats) {
        self.sites_crawled += 1;
        self.pages_visited += stats.visited_pages.len() as u64;
        self.pages_failed += u64::from(stats.pages_failed);
    }

    /// Records a site whose crawler aborted before fetching anything
    pub fn record_site_failure(&mut self) {
        self.sites_failed += 1;
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in seconds, if finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_seconds())
    }
}

impl Default for CrawlSummary {
    fn default() -> Self {
        Self::new()
    }
}
