mod tests;
mod utils;

pub use utils::{decode_entities, normalize_whitespace, strip_tags};
use utils::*;

/// Clean a text snippet coming from an API or scraped HTML.
///
/// Performs the following operations in order:
/// 1. Strip tags (Naver API titles wrap the keyword in `<b>`)
/// 2. Decode HTML entities (`&amp;` → `&`, `&quot;` → `"`)
/// 3. Remove zero-width and control characters
/// 4. Normalize Unicode to NFC
/// 5. Collapse whitespace and trim
///
/// # Examples
/// ```
/// use kwlens::tools::clean::clean_snippet;
///
/// let dirty = "<b>캠핑</b> 장비 &amp; 후기   정리";
/// assert_eq!(clean_snippet(dirty), "캠핑 장비 & 후기 정리");
/// ```
pub fn clean_snippet(text: &str) -> String {
    let mut result = strip_tags(text);
    result = decode_entities(&result);
    result = remove_zero_width_chars(&result);
    result = remove_control_chars(&result);
    result = normalize_unicode(&result);
    normalize_whitespace(&result)
}

/// Extract readable text from an HTML fragment or page.
///
/// Like [`clean_snippet`] but keeps paragraph breaks as newlines, which the
/// blog analytics use to count paragraphs.
pub fn html_to_text(html: &str) -> String {
    let text = decode_entities(&strip_tags_keep_breaks(html));
    let text = normalize_unicode(&remove_zero_width_chars(&text));
    text.lines()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
