//! Form input sanitizing and HTML escaping.
//!
//! User input is trimmed, stripped of anything that looks like an HTML tag
//! and cut to a UTF-8 byte budget on a character boundary.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// Trim, strip tag-like substrings, then truncate to `max_bytes`.
pub fn sanitize_and_cut(raw: &str, max_bytes: usize) -> String {
    let trimmed = raw.trim();
    let stripped = TAG_RE.replace_all(trimmed, "");
    cut_bytes(&stripped, max_bytes).to_string()
}

/// Longest prefix of `s` whose UTF-8 length is at most `max_bytes`.
///
/// Never splits a character: a multi-byte character that does not fit is
/// dropped entirely.
pub fn cut_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Escape text for interpolation into HTML bodies and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
