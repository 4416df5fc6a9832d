use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::selectors::{
    CANONICAL_SELECTOR, DATA_URL_SELECTOR, IFRAME_SELECTOR, LINK_SELECTOR, META_SELECTOR,
};
use crate::tools::clean::{clean_snippet, normalize_whitespace};
use crate::tools::format::parse_count;
use crate::tools::types::BlogItem;

static BLOG_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://(?:m\.)?blog\.naver\.com/").expect("valid regex"));

/// Result total phrasings on the Naver web SERP, tried in order.
static DOCUMENT_COUNT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"약\s*([0-9,]+)개",
        r"([0-9,]+)개의\s*결과",
        r"총\s*([0-9,]+)개",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Title anchors on the mobile blog SERP.
static TITLE_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href][class*=\"api_txt_lines\"], a[href][class*=\"title_link\"]")
        .expect("valid title link selector")
});

/// Post body containers, most specific first.
static POST_BODY_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["#postViewArea", ".se-main-container", ".se_component_wrap"]
        .iter()
        .map(|s| Selector::parse(s).expect("valid post body selector"))
        .collect()
});

/// Result total printed on the Naver web SERP, such as `약 1,234개` or `총 1,234개`.
pub fn extract_document_count(html: &str) -> Option<u64> {
    DOCUMENT_COUNT_PATTERNS.iter().find_map(|re| {
        re.captures(html)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_count(m.as_str()))
    })
}

pub(super) fn is_blog_link(href: &str) -> bool {
    BLOG_LINK.is_match(href.trim())
}

/// Blog link in canonical form: trimmed, `https:` scheme.
pub(super) fn normalize_blog_link(href: &str) -> String {
    let href = href.trim().replace("\\/", "/");
    match href.strip_prefix("http:") {
        Some(rest) => format!("https:{rest}"),
        None => href,
    }
}

/// Blog posts listed on a Naver blog SERP, deduplicated by link.
///
/// Title anchors are read first so a post keeps its headline even when a
/// thumbnail anchor for the same link appears earlier in the page. Entries
/// without anchor text fall back to the link as title.
pub fn parse_blog_serp(html: &str, limit: usize) -> Vec<BlogItem> {
    let document = Html::parse_document(html);
    let mut items: Vec<BlogItem> = Vec::new();

    let anchors = document
        .select(&TITLE_LINK_SELECTOR)
        .chain(document.select(&LINK_SELECTOR))
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let title = normalize_whitespace(&a.text().collect::<String>());
            Some((href, title))
        });
    let data_urls = document
        .select(&DATA_URL_SELECTOR)
        .filter_map(|el| el.value().attr("data-url"))
        .map(|href| (href, String::new()));

    for (href, title) in anchors.chain(data_urls) {
        if items.len() >= limit {
            break;
        }
        if !is_blog_link(href) {
            continue;
        }
        let link = normalize_blog_link(href);
        if items.iter().any(|item| item.link == link) {
            continue;
        }
        items.push(BlogItem {
            title: if title.is_empty() {
                link.clone()
            } else {
                title
            },
            link,
            description: String::new(),
        });
    }

    items
}

fn meta_content(document: &Html, key: &str) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .find(|meta| {
            let value = meta.value();
            value.attr("property") == Some(key) || value.attr("name") == Some(key)
        })
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// `og:description`, else `description` meta content.
pub fn extract_meta_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    meta_content(&document, "og:description")
        .filter(|d| !d.is_empty())
        .or_else(|| meta_content(&document, "description"))
        .filter(|d| !d.is_empty())
}

/// Canonical (or `og:url`) address of a page when it lives on blog.naver.com.
pub(super) fn canonical_blog_url(document: &Html) -> Option<String> {
    document
        .select(&CANONICAL_SELECTOR)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string)
        .or_else(|| meta_content(document, "og:url"))
        .filter(|url| url.to_ascii_lowercase().contains("blog.naver.com"))
}

/// Source of the frame holding the post: a PostView frame, else any blog.naver.com frame.
///
/// Relative sources are resolved against `page_url`.
pub(super) fn post_frame_url(document: &Html, page_url: &str) -> Option<String> {
    let sources: Vec<&str> = document
        .select(&IFRAME_SELECTOR)
        .filter_map(|frame| frame.value().attr("src"))
        .collect();

    let src = sources
        .iter()
        .find(|src| src.contains("PostView"))
        .or_else(|| sources.iter().find(|src| src.contains("blog.naver.com")))?;

    Url::parse(page_url)
        .ok()
        .and_then(|base| base.join(src.trim()).ok())
        .map(String::from)
}

/// Plain text of the post body container, when the page has one.
pub(super) fn extract_post_text(document: &Html) -> Option<String> {
    POST_BODY_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(|body| clean_snippet(&body.inner_html()))
            .filter(|text| !text.is_empty())
    })
}
