//! Link validation filters
//!
//! A candidate link survives only if its hostname carries one of the allowed
//! domain suffixes and the URL contains none of the denied resource-type
//! markers. The suffix check is a coarse TLD filter, not a registrable-domain
//! lookup, and the type check is a substring match anywhere in the URL, so a
//! query string containing `.pdf` also rejects.

use crate::url::hostname_of;

/// Domain suffixes a link hostname must end with to be crawlable
pub const ALLOWED_DOMAIN_SUFFIXES: [&str; 7] =
    [".com", ".pk", ".edu", ".net", ".co", ".org", ".me"];

/// Substrings that mark a URL as a non-page resource
pub const DENIED_TYPE_MARKERS: [&str; 7] =
    [".css", ".js", ".pdf", ".png", ".jpeg", ".jpg", ".ico"];

/// Returns true if the hostname ends with an allowed domain suffix
pub fn is_allowed_domain(hostname: &str) -> bool {
    ALLOWED_DOMAIN_SUFFIXES
        .iter()
        .any(|suffix| hostname.ends_with(suffix))
}

/// Returns true if the URL contains no denied resource-type marker
pub fn is_allowed_type(url: &str) -> bool {
    !DENIED_TYPE_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Validates a candidate link
///
/// Rejects empty URLs, URLs without a hostname, hostnames outside the domain
/// allowlist, URLs matching the type denylist, and anything containing
/// `mailto:`.
pub fn is_valid_link(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let hostname = hostname_of(url);
    if hostname.is_empty() || !is_allowed_domain(hostname) {
        return false;
    }

    if !is_allowed_type(url) {
        return false;
    }

    !url.contains("mailto:")
}
