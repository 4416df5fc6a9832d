/// Private helper functions for text cleaning
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static SCRIPT_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)\s*>")
        .expect("valid regex")
});

static BLOCK_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(br|/p|/div|/li|/h[1-6]|/tr)\b[^>]*>").expect("valid regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Remove `<script>`/`<style>` blocks and every remaining tag.
pub fn strip_tags(html: &str) -> String {
    let without_code = SCRIPT_STYLE_REGEX.replace_all(html, " ");
    TAG_REGEX.replace_all(&without_code, " ").into_owned()
}

/// Like [`strip_tags`] but turns block-level closing tags into newlines.
pub(super) fn strip_tags_keep_breaks(html: &str) -> String {
    let without_code = SCRIPT_STYLE_REGEX.replace_all(html, " ");
    let with_breaks = BLOCK_TAG_REGEX.replace_all(&without_code, "\n");
    TAG_REGEX.replace_all(&with_breaks, " ").into_owned()
}

/// Decode HTML entities (named and numeric).
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).to_string()
}

/// Normalize Unicode to NFC (Canonical Composition).
///
/// Hangul typed on macOS often arrives decomposed (NFD); composing it keeps
/// keyword matching consistent.
pub(super) fn normalize_unicode(text: &str) -> String {
    text.nfc().collect::<String>()
}

pub(super) fn remove_zero_width_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .collect()
}

/// Remove control characters except newlines and tabs.
pub(super) fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Collapse runs of whitespace (including newlines) into one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}
