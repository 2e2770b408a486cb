//! Integration tests for the crawler
//!
//! These tests run real crawls against in-process TCP stub servers and
//! observe results through a collecting report sink.

use crawlspan::config::{Config, CrawlerConfig};
use crawlspan::crawler::{Scheduler, SiteCrawler};
use crawlspan::output::{CrawlSummary, ReportSink, SiteStats};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Report sink that records everything it is handed
#[derive(Default)]
struct CollectingReport {
    sites: Mutex<Vec<(SiteStats, u32)>>,
    summaries: Mutex<Vec<CrawlSummary>>,
}

impl CollectingReport {
    fn sites(&self) -> Vec<(SiteStats, u32)> {
        self.sites.lock().unwrap().clone()
    }
}

impl ReportSink for CollectingReport {
    fn site_crawled(&self, stats: &SiteStats, depth: u32) {
        self.sites.lock().unwrap().push((stats.clone(), depth));
    }

    fn run_completed(&self, summary: &CrawlSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}

fn test_config(
    seed_urls: Vec<String>,
    port: u16,
    depth_limit: u32,
    pages_per_site: i64,
    max_concurrency: u32,
) -> Config {
    Config {
        crawler: CrawlerConfig {
            crawl_delay: 0,
            max_concurrency,
            depth_limit,
            pages_per_site,
            linked_sites_limit: 10,
            port,
        },
        seed_urls,
    }
}

/// Serves the given path -> body map on a fresh loopback port
///
/// Unknown paths get an empty body. Connections are handled one request
/// each, `Connection: close` style.
async fn spawn_site(pages: HashMap<String, String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let pages = Arc::new(pages);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let pages = Arc::clone(&pages);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let path = request
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();
                let body = pages.get(&path).cloned().unwrap_or_default();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n{}",
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    addr
}

#[tokio::test]
async fn test_seed_scenario_depth_zero_single_page() {
    // Seed page carries both internal and external links, but with
    // depth-limit 0 and one page per site, exactly one page is fetched and
    // no follow-on site is scheduled.
    let mut pages = HashMap::new();
    pages.insert(
        "/".to_string(),
        r#"<a href="https://other.org/x">x</a> <a href="https://third.net/y">y</a>"#.to_string(),
    );
    let addr = spawn_site(pages).await;

    let report = Arc::new(CollectingReport::default());
    let config = test_config(
        vec!["http://127.0.0.1".to_string()],
        addr.port(),
        0,
        1,
        3,
    );

    let summary = Scheduler::new(config, report.clone()).run().await;

    let sites = report.sites();
    assert_eq!(sites.len(), 1);

    let (stats, depth) = &sites[0];
    assert_eq!(depth, &0);
    assert_eq!(stats.hostname, "127.0.0.1");
    assert_eq!(stats.visited_pages.len(), 1);
    assert_eq!(stats.pages_failed, 0);
    assert!(!stats.linked_sites.is_empty());

    assert_eq!(summary.sites_crawled, 1);
    assert_eq!(summary.sites_discovered, 1);
    assert_eq!(summary.pages_visited, 1);
}

#[tokio::test]
async fn test_site_that_closes_immediately() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            drop(socket);
        }
    });

    let report = Arc::new(CollectingReport::default());
    let config = test_config(vec!["http://127.0.0.1".to_string()], port, 0, -1, 1);

    let summary = Scheduler::new(config, report.clone()).run().await;

    let sites = report.sites();
    assert_eq!(sites.len(), 1);

    let (stats, _) = &sites[0];
    assert_eq!(stats.visited_pages.len(), 1);
    assert_eq!(stats.visited_pages[0].response_time_ms, -1.0);
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.min_response_time, -1.0);
    assert_eq!(stats.average_response_time, -1.0);

    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.sites_crawled, 1);
}

#[tokio::test]
async fn test_external_links_classified_and_filtered() {
    let mut pages = HashMap::new();
    pages.insert(
        "/".to_string(),
        r#"<a href="https://other.org/x">good</a> <a href="bad.exe">bad</a>"#.to_string(),
    );
    let addr = spawn_site(pages).await;

    let report = Arc::new(CollectingReport::default());
    let config = test_config(
        vec!["http://127.0.0.1".to_string()],
        addr.port(),
        0,
        -1,
        1,
    );

    Scheduler::new(config, report.clone()).run().await;

    let sites = report.sites();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].0.linked_sites, vec!["other.org".to_string()]);
}

#[tokio::test]
async fn test_max_concurrency_one_serializes_sites() {
    // Three seed sites backed by one listener that tracks how many
    // connections are open at once; with max-concurrency 1 the crawls can
    // never overlap.
    let listener = TcpListener::bind("0.0.0.0:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let current = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    {
        let current = Arc::clone(&current);
        let peak = Arc::clone(&peak);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let current = Arc::clone(&current);
                let peak = Arc::clone(&peak);
                tokio::spawn(async move {
                    let open = current.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(open, Ordering::SeqCst);

                    let mut buf = vec![0u8; 1024];
                    let _ = socket.read(&mut buf).await;
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    let _ = socket
                        .write_all(b"HTTP/1.1 200 OK\r\n\r\n<html>ok</html>")
                        .await;

                    current.fetch_sub(1, Ordering::SeqCst);
                });
            }
        });
    }

    let report = Arc::new(CollectingReport::default());
    let config = test_config(
        vec![
            "http://127.0.0.1".to_string(),
            "http://127.0.0.2".to_string(),
            "http://127.0.0.3".to_string(),
        ],
        port,
        0,
        1,
        1,
    );

    let summary = Scheduler::new(config, report.clone()).run().await;

    assert_eq!(summary.sites_crawled, 3);
    assert_eq!(report.sites().len(), 3);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_discovered_site_folded_at_next_depth() {
    // The linked hostname does not resolve, so the depth-1 crawl fails at
    // construction; the scheduler must still report it and terminate.
    let mut pages = HashMap::new();
    pages.insert(
        "/".to_string(),
        r#"<a href="https://crawlspan-missing-host.org/x">next</a>"#.to_string(),
    );
    let addr = spawn_site(pages).await;

    let report = Arc::new(CollectingReport::default());
    let config = test_config(
        vec!["http://127.0.0.1".to_string()],
        addr.port(),
        1,
        -1,
        2,
    );

    let summary = Scheduler::new(config, report.clone()).run().await;

    let sites = report.sites();
    assert_eq!(sites.len(), 2);

    let folded: Vec<_> = sites
        .iter()
        .filter(|(s, _)| s.hostname == "crawlspan-missing-host.org")
        .collect();
    assert_eq!(folded.len(), 1);
    let (stats, depth) = folded[0];
    assert_eq!(*depth, 1);
    assert!(stats.visited_pages.is_empty());

    assert_eq!(summary.sites_discovered, 2);
    assert_eq!(summary.sites_failed, 1);
    assert_eq!(summary.sites_crawled, 1);
}

#[tokio::test]
async fn test_bfs_discovers_internal_pages_in_fifo_order() {
    let mut pages = HashMap::new();
    pages.insert(
        "/".to_string(),
        r#"<a href="http://stub.com/a">a</a> <a href="http://stub.com/b">b</a>"#.to_string(),
    );
    pages.insert(
        "/a".to_string(),
        r#"<a href="http://stub.com/c">c</a> <a href="https://other.org/">o</a>"#.to_string(),
    );
    pages.insert("/b".to_string(), "<html>leaf</html>".to_string());
    pages.insert("/c".to_string(), "<html>leaf</html>".to_string());
    let addr = spawn_site(pages).await;

    let crawler = SiteCrawler::with_addr("stub.com", addr, -1, Duration::from_millis(0));
    let stats = crawler.crawl().await;

    let urls: Vec<_> = stats.visited_pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["stub.com/", "stub.com/a", "stub.com/b", "stub.com/c"]
    );
    assert_eq!(stats.pages_failed, 0);
    assert_eq!(stats.linked_sites, vec!["other.org".to_string()]);
    assert!(stats.min_response_time >= 0.0);
    assert!(stats.max_response_time >= stats.min_response_time);
    assert!(stats.average_response_time >= stats.min_response_time);
    assert!(stats.average_response_time <= stats.max_response_time);
}

#[tokio::test]
async fn test_pages_discovered_at_most_once() {
    // Every page links back to the root and to /loop; the crawl must not
    // revisit either
    let mut pages = HashMap::new();
    pages.insert(
        "/".to_string(),
        r#"<a href="http://stub.com/loop">l</a> <a href="http://stub.com/">r</a>"#.to_string(),
    );
    pages.insert(
        "/loop".to_string(),
        r#"<a href="http://stub.com/">r</a> <a href="http://stub.com/loop">l</a>"#.to_string(),
    );
    let addr = spawn_site(pages).await;

    let crawler = SiteCrawler::with_addr("stub.com", addr, -1, Duration::from_millis(0));
    let stats = crawler.crawl().await;

    assert_eq!(stats.visited_pages.len(), 2);
    let urls: Vec<_> = stats.visited_pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["stub.com/", "stub.com/loop"]);
}

#[tokio::test]
async fn test_failed_page_accounting() {
    // "/" responds, every other page is closed without a byte
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 1024];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                if path == "/" {
                    let body = r#"<a href="http://stub.com/gone">x</a>"#;
                    let response = format!("HTTP/1.1 200 OK\r\n\r\n{}", body);
                    let _ = socket.write_all(response.as_bytes()).await;
                }
            });
        }
    });

    let crawler = SiteCrawler::with_addr("stub.com", addr, -1, Duration::from_millis(0));
    let stats = crawler.crawl().await;

    assert_eq!(stats.visited_pages.len(), 2);
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.visited_pages[1].response_time_ms, -1.0);
    // The average covers only the page that succeeded
    assert_eq!(
        stats.average_response_time,
        stats.visited_pages[0].response_time_ms
    );
}
