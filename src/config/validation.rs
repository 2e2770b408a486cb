use crate::config::types::{Config, CrawlerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// An invalid configuration is a fatal startup error; nothing is crawled
/// until this passes.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_seed_urls(&config.seed_urls)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // crawl_delay and depth_limit are unsigned, so no lower-bound checks

    if config.max_concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "max-concurrency must be >= 1, got {}",
            config.max_concurrency
        )));
    }

    if config.pages_per_site < -1 {
        return Err(ConfigError::Validation(format!(
            "pages-per-site must be >= -1 (-1 means unlimited), got {}",
            config.pages_per_site
        )));
    }

    Ok(())
}

/// Validates the seed URL list
fn validate_seed_urls(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "seed-urls must contain at least one URL".to_string(),
        ));
    }

    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}': only http and https schemes are supported",
                seed
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}': missing hostname",
                seed
            )));
        }
    }

    Ok(())
}
