//! Multi-site crawl scheduling
//!
//! The scheduler owns the cross-site frontier: a FIFO queue of
//! (hostname, depth) tasks, the global set of discovered sites, and the
//! active-worker count. One coordinating task admits workers while capacity
//! remains and sleeps on a notification otherwise; workers are spawned
//! fire-and-forget and report completion only through the shared state.
//! The run ends when the frontier is empty and the worker count is zero at
//! the same time - an empty frontier alone is not enough, because running
//! workers may still enqueue new sites.

use crate::config::Config;
use crate::crawler::site::SiteCrawler;
use crate::output::{CrawlSummary, ReportSink, SiteStats};
use crate::url::hostname_of;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// A site waiting to be crawled
///
/// `depth` is the site-to-site hop count from a seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSite {
    pub hostname: String,
    pub depth: u32,
}

/// State shared between the coordinator and all workers
///
/// Every field lives behind one mutex and is only reachable through methods
/// that lock internally, so no caller can mutate the frontier, the
/// discovered-site set, or the worker count unlocked. Mutations that the
/// coordinator must react to are followed by a notification; `Notify` stores
/// a permit when the coordinator is not waiting, so completions are never
/// missed.
struct SharedState {
    inner: Mutex<StateInner>,
    changed: Notify,
}

struct StateInner {
    pending_sites: VecDeque<PendingSite>,
    discovered_sites: HashSet<String>,
    active_workers: usize,
    summary: CrawlSummary,
}

impl SharedState {
    fn new() -> Self {
        Self {
            inner: Mutex::new(StateInner {
                pending_sites: VecDeque::new(),
                discovered_sites: HashSet::new(),
                active_workers: 0,
                summary: CrawlSummary::new(),
            }),
            changed: Notify::new(),
        }
    }

    /// Enqueues a seed hostname at depth 0 unless already discovered
    fn seed(&self, hostname: &str) {
        if hostname.is_empty() {
            return;
        }
        let mut inner = self.inner.lock().unwrap();
        if inner.discovered_sites.insert(hostname.to_string()) {
            inner.pending_sites.push_back(PendingSite {
                hostname: hostname.to_string(),
                depth: 0,
            });
        }
    }

    /// Claims frontier tasks while capacity remains, in FIFO order
    ///
    /// The worker count is bumped for each claimed task inside the same
    /// critical section, so capacity can never be oversubscribed.
    fn claim_tasks(&self, max_concurrency: usize) -> Vec<PendingSite> {
        let mut inner = self.inner.lock().unwrap();
        let mut claimed = Vec::new();
        while inner.active_workers < max_concurrency {
            match inner.pending_sites.pop_front() {
                Some(task) => {
                    inner.active_workers += 1;
                    claimed.push(task);
                }
                None => break,
            }
        }
        claimed
    }

    /// True when the frontier is empty and no worker is running
    fn is_idle(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.pending_sites.is_empty() && inner.active_workers == 0
    }

    /// Folds a completed crawl into the summary and expands the frontier
    ///
    /// Up to `fan_out_limit` hostnames not yet in the discovered-site set are
    /// enqueued at `depth + 1`; already-known hostnames do not consume the
    /// limit. Nothing is folded at or beyond the depth limit.
    fn complete_site(&self, stats: &SiteStats, depth: u32, depth_limit: u32, fan_out_limit: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.summary.absorb(stats);

        if depth < depth_limit {
            let mut folded = 0;
            for hostname in &stats.linked_sites {
                if folded >= fan_out_limit {
                    break;
                }
                if inner.discovered_sites.insert(hostname.clone()) {
                    inner.pending_sites.push_back(PendingSite {
                        hostname: hostname.clone(),
                        depth: depth + 1,
                    });
                    folded += 1;
                }
            }
        }

        drop(inner);
        self.changed.notify_one();
    }

    /// Records a site whose crawler could not start
    fn record_site_failure(&self) {
        self.inner.lock().unwrap().summary.record_site_failure();
    }

    /// Releases one worker slot and wakes the coordinator
    fn worker_finished(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.active_workers -= 1;
        drop(inner);
        self.changed.notify_one();
    }

    async fn wait_for_change(&self) {
        self.changed.notified().await;
    }

    /// Stamps and returns the finished run summary
    fn finish_summary(&self) -> CrawlSummary {
        let mut inner = self.inner.lock().unwrap();
        inner.summary.sites_discovered = inner.discovered_sites.len() as u64;
        inner.summary.finish();
        inner.summary.clone()
    }

    #[cfg(test)]
    fn frontier_snapshot(&self) -> Vec<PendingSite> {
        self.inner.lock().unwrap().pending_sites.iter().cloned().collect()
    }

    #[cfg(test)]
    fn active_workers(&self) -> usize {
        self.inner.lock().unwrap().active_workers
    }
}

/// Releases the worker slot exactly once on every exit path
///
/// Held for the whole worker body; dropping it - on normal return or on a
/// panic unwinding the task - decrements the count and notifies the
/// coordinator.
struct WorkerGuard {
    state: Arc<SharedState>,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.state.worker_finished();
    }
}

/// Coordinates a bounded pool of site-crawler workers over a shared frontier
pub struct Scheduler {
    config: Arc<Config>,
    state: Arc<SharedState>,
    report: Arc<dyn ReportSink>,
}

impl Scheduler {
    /// Creates a scheduler for a validated configuration
    pub fn new(config: Config, report: Arc<dyn ReportSink>) -> Self {
        Self {
            config: Arc::new(config),
            state: Arc::new(SharedState::new()),
            report,
        }
    }

    /// Runs the crawl to completion and returns the run summary
    ///
    /// Seeds the frontier from the configured URLs, then loops: admit
    /// workers while the frontier is non-empty and capacity remains, exit
    /// once the frontier is empty with zero active workers, and otherwise
    /// sleep until a worker signals a state change.
    pub async fn run(&self) -> CrawlSummary {
        for seed in &self.config.seed_urls {
            self.state.seed(hostname_of(seed));
        }

        loop {
            let tasks = self
                .state
                .claim_tasks(self.config.crawler.max_concurrency as usize);
            for task in tasks {
                self.spawn_worker(task);
            }

            if self.state.is_idle() {
                break;
            }
            self.state.wait_for_change().await;
        }

        let summary = self.state.finish_summary();
        self.report.run_completed(&summary);
        summary
    }

    /// Launches one fire-and-forget worker for a claimed task
    ///
    /// No error crosses the worker boundary: a site whose crawler cannot
    /// start is logged and reported as an empty result, and the guard makes
    /// the slot release unconditional.
    fn spawn_worker(&self, task: PendingSite) {
        let state = Arc::clone(&self.state);
        let config = Arc::clone(&self.config);
        let report = Arc::clone(&self.report);

        tokio::spawn(async move {
            let _guard = WorkerGuard {
                state: Arc::clone(&state),
            };

            let crawler = SiteCrawler::new(
                &task.hostname,
                config.crawler.port,
                config.crawler.pages_per_site,
                Duration::from_millis(config.crawler.crawl_delay),
            )
            .await;

            match crawler {
                Ok(crawler) => {
                    tracing::info!("Crawling {} at depth {}", task.hostname, task.depth);
                    let stats = crawler.crawl().await;
                    report.site_crawled(&stats, task.depth);
                    state.complete_site(
                        &stats,
                        task.depth,
                        config.crawler.depth_limit,
                        config.crawler.linked_sites_limit as usize,
                    );
                }
                Err(e) => {
                    tracing::warn!("Skipping site {}: {}", task.hostname, e);
                    let mut empty = SiteStats::new(&task.hostname);
                    empty.finalize();
                    report.site_crawled(&empty, task.depth);
                    state.record_site_failure();
                }
            }
        });
    }
}
