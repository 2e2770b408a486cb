//! URL handling module for crawlspan
//!
//! This module provides the string-level URL operations the crawler is built
//! on: splitting a URL into hostname and path, validating candidate links
//! against the domain allowlist and resource-type denylist, and normalizing
//! raw HTTP response text ahead of link extraction.

mod filter;
mod normalize;
mod split;

// Re-export main functions
pub use filter::{is_allowed_domain, is_allowed_type, is_valid_link};
pub use normalize::normalize_response;
pub use split::{hostname_of, path_of};
