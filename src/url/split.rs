//! Splitting URLs into hostname and path
//!
//! These functions operate on plain strings rather than parsed URLs: link
//! candidates come out of a heuristic scan over response text and are often
//! scheme-less or otherwise not parseable by a strict URL parser.

/// Strips an optional `http://` or `https://` prefix
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Extracts the hostname portion of a URL
///
/// The optional scheme prefix is removed, then everything up to (not
/// including) the first `/` is returned, or the whole remainder if the URL
/// has no path.
///
/// # Examples
///
/// ```
/// use crawlspan::url::hostname_of;
///
/// assert_eq!(hostname_of("http://example.com/path"), "example.com");
/// assert_eq!(hostname_of("example.com"), "example.com");
/// assert_eq!(hostname_of("/just/a/path"), "");
/// ```
pub fn hostname_of(url: &str) -> &str {
    let rest = strip_scheme(url);
    match rest.find('/') {
        Some(pos) => &rest[..pos],
        None => rest,
    }
}

/// Extracts the path portion of a URL
///
/// The optional scheme prefix is removed; if no `/` follows the hostname the
/// path is `/`. A run of leading slashes collapses down to a single one.
///
/// # Examples
///
/// ```
/// use crawlspan::url::path_of;
///
/// assert_eq!(path_of("http://example.com/a/b"), "/a/b");
/// assert_eq!(path_of("example.com"), "/");
/// assert_eq!(path_of("example.com///a"), "/a");
/// ```
pub fn path_of(url: &str) -> String {
    let rest = strip_scheme(url);
    match rest.find('/') {
        None => "/".to_string(),
        Some(pos) => {
            let trimmed = rest[pos..].trim_start_matches('/');
            if trimmed.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", trimmed)
            }
        }
    }
}
