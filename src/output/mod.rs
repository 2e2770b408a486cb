//! Output module for crawl statistics and reporting
//!
//! This module holds the statistics types produced by the crawler and the
//! reporting sink the scheduler hands them to. The core is agnostic to how a
//! sink renders them; the shipped [`ConsoleReport`] prints per-site summaries
//! and a final run summary to stdout.

mod report;
mod stats;

pub use report::{ConsoleReport, ReportSink};
pub use stats::{CrawlSummary, PageStats, SiteStats, FAILED_RESPONSE_TIME};
