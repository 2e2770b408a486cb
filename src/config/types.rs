use serde::Deserialize;

/// Main configuration structure for crawlspan
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,

    /// Absolute http(s) URLs the crawl starts from
    #[serde(rename = "seed-urls")]
    pub seed_urls: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pause between successive page fetches on one site (milliseconds)
    #[serde(rename = "crawl-delay", default = "default_crawl_delay")]
    pub crawl_delay: u64,

    /// Maximum number of sites crawled concurrently
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: u32,

    /// Maximum site-to-site hops from a seed
    #[serde(rename = "depth-limit", default = "default_depth_limit")]
    pub depth_limit: u32,

    /// Maximum fetch attempts per site; -1 means unlimited
    #[serde(rename = "pages-per-site", default = "default_pages_per_site")]
    pub pages_per_site: i64,

    /// Maximum newly discovered sites enqueued per completed crawl
    #[serde(rename = "linked-sites-limit", default = "default_linked_sites_limit")]
    pub linked_sites_limit: u32,

    /// TCP port requests are sent to
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_crawl_delay() -> u64 {
    1000
}

fn default_max_concurrency() -> u32 {
    10
}

fn default_depth_limit() -> u32 {
    10
}

fn default_pages_per_site() -> i64 {
    10
}

fn default_linked_sites_limit() -> u32 {
    10
}

fn default_port() -> u16 {
    80
}
