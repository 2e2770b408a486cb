//! Reporting sinks for completed crawls
//!
//! The scheduler hands every finished [`SiteStats`] and the final
//! [`CrawlSummary`] to a [`ReportSink`]; implementations decide how to render
//! them. [`ConsoleReport`] is the default and prints human-readable summaries
//! to stdout.

use crate::output::{CrawlSummary, SiteStats};
use std::fmt::Write as _;

/// Trait for crawl report sinks
///
/// The scheduler calls `site_crawled` from worker tasks, so implementations
/// must be thread-safe.
pub trait ReportSink: Send + Sync {
    /// Called once per completed site crawl, including fully-failed sites
    fn site_crawled(&self, stats: &SiteStats, depth: u32);

    /// Called once after the frontier drains and all workers finish
    fn run_completed(&self, summary: &CrawlSummary);
}

/// Report sink that prints summaries to stdout
#[derive(Debug, Default)]
pub struct ConsoleReport;

impl ConsoleReport {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleReport {
    fn site_crawled(&self, stats: &SiteStats, depth: u32) {
        // Render to one string and print it in a single call so per-site
        // summaries from concurrent workers never interleave.
        print!("{}", render_site(stats, depth));
    }

    fn run_completed(&self, summary: &CrawlSummary) {
        print!("{}", render_run(summary));
    }
}

/// Formats one site summary
fn render_site(stats: &SiteStats, depth: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "----------------------------------------------------------------------------"
    );
    let _ = writeln!(out, "Website: {}", stats.hostname);
    let _ = writeln!(out, "Depth: {}", depth);
    let _ = writeln!(out, "Pages Visited: {}", stats.visited_pages.len());
    let _ = writeln!(out, "Pages Failed: {}", stats.pages_failed);
    let _ = writeln!(out, "Linked Sites: {}", stats.linked_sites.len());
    let _ = writeln!(
        out,
        "Response Times (ms) - Min: {:.2}, Max: {:.2}, Avg: {:.2}",
        stats.min_response_time, stats.max_response_time, stats.average_response_time
    );
    for page in &stats.visited_pages {
        if page.response_time_ms < 0.0 {
            let _ = writeln!(out, "    failed  {}", page.url);
        } else {
            let _ = writeln!(out, "  {:>8.2}  {}", page.response_time_ms, page.url);
        }
    }
    out
}

/// Formats the run summary
fn render_run(summary: &CrawlSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "============================================================================"
    );
    let _ = writeln!(out, "Crawl finished");
    let _ = writeln!(out, "  Sites crawled:    {}", summary.sites_crawled);
    let _ = writeln!(out, "  Sites failed:     {}", summary.sites_failed);
    let _ = writeln!(out, "  Sites discovered: {}", summary.sites_discovered);
    let _ = writeln!(out, "  Pages visited:    {}", summary.pages_visited);
    let _ = writeln!(out, "  Pages failed:     {}", summary.pages_failed);
    let _ = writeln!(
        out,
        "  Started:          {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(seconds) = summary.duration_seconds() {
        let _ = writeln!(out, "  Duration:         {}s", seconds);
    }
    out
}
