//! Link extraction from raw HTTP responses
//!
//! The extractor is a tolerant token scan, not an HTML parser. The response
//! text (headers and body together) is normalized, then scanned for a small
//! set of anchor markers; each hit is cut at the first terminator character
//! and validated. The scan is best-effort and false-positive-tolerant: a URL
//! that matches more than one marker appears more than once in the output,
//! and deduplication is the caller's responsibility.

use crate::url::{hostname_of, is_valid_link, normalize_response, path_of};

/// Markers a URL may start after in normalized response text
const LINK_MARKERS: [&str; 4] = ["href=\"", "href = \"", "http://", "https://"];

/// Characters that end a URL candidate
const LINK_TERMINATORS: [char; 5] = ['"', '#', '?', ',', ' '];

/// A validated link split into its hostname and path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Hostname portion; empty for scheme-less relative candidates
    pub hostname: String,

    /// Path portion, always starting with `/`
    pub path: String,
}

/// Whether a link stays on the current site or leaves it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    /// Another page on the site being crawled
    Internal,

    /// A candidate site for a later crawl
    External,
}

impl ExtractedLink {
    /// Classifies this link relative to the site being crawled
    ///
    /// A link is internal when its hostname is empty or exactly equals the
    /// site's hostname; no case folding is applied.
    pub fn scope(&self, site_hostname: &str) -> LinkScope {
        if self.hostname.is_empty() || self.hostname == site_hostname {
            LinkScope::Internal
        } else {
            LinkScope::External
        }
    }
}

/// Scans response text for links
///
/// For each marker, every occurrence is considered: the candidate runs from
/// just after the marker to the first terminator character. A candidate with
/// no terminator before end-of-text ends that marker's scan. Candidates that
/// pass [`is_valid_link`] are emitted in scan order.
pub fn extract_links(response_text: &str) -> Vec<ExtractedLink> {
    let normalized = normalize_response(response_text);
    let mut links = Vec::new();

    for marker in LINK_MARKERS {
        let mut pos = 0;
        while let Some(found) = normalized[pos..].find(marker) {
            let start = pos + found + marker.len();
            let end = match normalized[start..].find(&LINK_TERMINATORS[..]) {
                Some(offset) => start + offset,
                None => break,
            };

            let candidate = &normalized[start..end];
            if is_valid_link(candidate) {
                links.push(ExtractedLink {
                    hostname: hostname_of(candidate).to_string(),
                    path: path_of(candidate),
                });
            }
            pos = end;
        }
    }

    links
}
