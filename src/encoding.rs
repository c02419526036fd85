//! Decoding fetched page bytes to UTF-8.
//!
//! Japanese catalog sites still serve Shift_JIS and EUC-JP pages. The
//! charset comes from the HTTP `Content-Type` header when present, then from
//! the page's own `<meta>` declaration, then defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `charset=...` inside a header value or a `<meta>` tag.
#[allow(clippy::expect_used)]
static CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("valid regex")
});

/// A `<meta>` tag carrying a charset, directly or through `http-equiv`.
#[allow(clippy::expect_used)]
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset[^>]*>"#).expect("valid regex")
});

fn charset_label(text: &str) -> Option<&'static Encoding> {
    CHARSET_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Pick the encoding of a fetched page.
///
/// Only the first 2048 bytes are scanned for a `<meta>` declaration.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type.and_then(charset_label) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(2048)]);
    META_TAG_RE
        .find(&head)
        .and_then(|tag| charset_label(tag.as_str()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn decode_html(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(html, content_type);
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
