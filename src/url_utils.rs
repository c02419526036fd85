//! URL Utility Functions
//!
//! Host lookup for site models, resolution of scraped `href`/`src` values and
//! cleanup of official website links.

use url::Url;

/// Query parameters that only track the visit.
const TRACKING_PARAMS: &[&str] = &["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content", "ref", "ref_", "tag"];

/// Parse an absolute http(s) URL.
///
/// # Returns
/// * The parsed URL when `s` is absolute, uses http or https and has a host
#[must_use]
pub fn parse_absolute(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Extract the hostname from a URL.
///
/// # Returns
/// * The lowercase hostname, or `None` if the URL is not absolute
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    parse_absolute(url_str).and_then(|url| url.host_str().map(str::to_ascii_lowercase))
}

/// Hostname without a leading `www.` and trailing dot.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Resolve a scraped link against the page URL.
///
/// # Returns
/// * `None` for empty, `javascript:` and `mailto:` links
/// * The link unchanged when it is absolute or no base is known
/// * The resolved absolute URL otherwise
#[must_use]
pub fn resolve_href(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with("javascript:") || href.starts_with("mailto:") {
        return None;
    }
    if href.starts_with("data:") || parse_absolute(href).is_some() {
        return Some(href.to_string());
    }
    match base {
        Some(base) => base.join(href).ok().map(String::from),
        None => Some(href.to_string()),
    }
}

/// Clean an official website link.
///
/// Drops tracking parameters and the fragment. Links that do not parse are
/// returned trimmed.
#[must_use]
pub fn clean_website(href: &str) -> String {
    let href = href.trim();
    let Some(mut url) = parse_absolute(href) else {
        return href.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !TRACKING_PARAMS.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.set_fragment(None);
    url.to_string()
}

/// Whether the URL points at the Steam store.
#[must_use]
pub fn is_steam_store(url_str: &str) -> bool {
    extract_hostname(url_str).is_some_and(|host| normalize_host(&host) == "store.steampowered.com")
}
