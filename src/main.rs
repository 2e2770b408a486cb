//! Crawlspan main entry point
//!
//! This is the command-line interface for the crawlspan web crawler.

use anyhow::Context;
use clap::Parser;
use crawlspan::config::{load_config_with_hash, Config};
use crawlspan::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawlspan: a breadth-first multi-site crawler
///
/// Crawlspan walks each configured site breadth-first over raw HTTP,
/// measures per-page response times, and follows discovered external sites
/// up to a configured depth.
#[derive(Parser, Debug)]
#[command(name = "crawlspan")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first multi-site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    tracing::info!("Starting crawl with {} seed URLs", config.seed_urls.len());
    let summary = crawl(config).await;
    tracing::info!(
        "Crawl completed: {} sites crawled, {} pages visited",
        summary.sites_crawled,
        summary.pages_visited
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawlspan=info,warn"),
            1 => EnvFilter::new("crawlspan=debug,info"),
            2 => EnvFilter::new("crawlspan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn print_dry_run(config: &Config) {
    println!("=== Crawlspan Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Crawl delay: {}ms", config.crawler.crawl_delay);
    println!("  Max concurrency: {}", config.crawler.max_concurrency);
    println!("  Depth limit: {}", config.crawler.depth_limit);
    if config.crawler.pages_per_site < 0 {
        println!("  Pages per site: unlimited");
    } else {
        println!("  Pages per site: {}", config.crawler.pages_per_site);
    }
    println!("  Linked sites limit: {}", config.crawler.linked_sites_limit);
    println!("  Port: {}", config.crawler.port);

    println!("\nSeed URLs ({}):", config.seed_urls.len());
    for seed in &config.seed_urls {
        println!("  - {}", seed);
    }

    println!("\n\u{2713} Configuration is valid");
    println!(
        "\u{2713} Would start crawling {} seed site(s)",
        config.seed_urls.len()
    );
}
