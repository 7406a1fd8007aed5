//! URL acceptance rules for shortening requests.
//!
//! Both checks parse the input with the WHATWG-compatible [`url`] parser and
//! never panic on malformed input.

use url::Url;

/// Hostnames that may not be shortened.
///
/// Compared against the parsed host, which the parser already lowercases
/// for `http`/`https` URLs.
pub const BLOCKED_DOMAINS: &[&str] = &["blocked.com", "www.blocked.com"];

/// Schemes accepted by [`is_valid_url`].
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Returns `true` if `url` is an absolute URL with an `http` or `https` scheme.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/path?q=1"));
/// assert!(!is_valid_url("ftp://example.com"));
/// assert!(!is_valid_url("example.com"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => ALLOWED_SCHEMES.contains(&parsed.scheme()),
        Err(_) => false,
    }
}

/// Returns `true` if the host of `url` is on the blocklist.
///
/// Unparseable input is reported as not blocked; [`is_valid_url`] is
/// expected to reject it first.
pub fn is_blocked_domain(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| BLOCKED_DOMAINS.contains(&host)))
        .unwrap_or(false)
}
