use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use super::probes::parse_all;
use super::types::Feed;
use crate::selectors::{IMG_SELECTOR, LINK_SELECTOR};
use crate::tools::clean::normalize_whitespace;

pub(super) const ENGINE_HOST: &str = "search.naver.com";
const ENGINE_BASE: &str = "https://search.naver.com/search.naver";

const MAX_TITLE_CHARS: usize = 100;
const MAX_FEED_CANDIDATE_CHARS: usize = 200;
const MAX_FEED_DESC_CHARS: usize = 300;
pub(super) const MAX_FEEDS: usize = 10;

const UI_CHROME: &[&str] = &[
    "search option detail",
    "select",
    "btn",
    "button",
    "link",
    "url",
    "desc",
    "mod more",
    "keep",
    "api",
    "ct feed",
    "main",
    "option",
    "search",
    "sc page",
    "feed",
    "more",
    "detail",
];

static PUNCTUATION_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^a-zA-Z가-힣0-9\s]+$").expect("valid regex"));

static FEED_TITLES: Lazy<Vec<Selector>> = Lazy::new(|| {
    parse_all(&[
        "a[class*=\"title\"]",
        "span[class*=\"title\"]",
        "div[class*=\"title\"]",
        "h3",
        "h4",
        "a",
        "span[class*=\"link\"]",
        "div[class*=\"link\"]",
        "span[class*=\"text\"]",
        "div[class*=\"text\"]",
    ])
});

static FEED_DESCRIPTIONS: Lazy<Vec<Selector>> = Lazy::new(|| {
    parse_all(&[
        "div[class*=\"desc\"]",
        "span[class*=\"desc\"]",
        "p[class*=\"desc\"]",
        "div[class*=\"summary\"]",
    ])
});

static FEED_DATES: Lazy<Vec<Selector>> =
    Lazy::new(|| parse_all(&["span[class*=\"date\"]", "div[class*=\"date\"]", "time"]));

static FEED_AUTHORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    parse_all(&[
        "span[class*=\"author\"]",
        "div[class*=\"author\"]",
        "span[class*=\"writer\"]",
    ])
});

/// Lowercased `class` attribute (empty when absent).
pub(super) fn class_attr(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("class")
        .unwrap_or_default()
        .to_lowercase()
}

pub(super) fn has_class_token(element: ElementRef<'_>, token: &str) -> bool {
    element
        .value()
        .classes()
        .any(|c| c.eq_ignore_ascii_case(token))
}

/// Whitespace-normalized text content.
pub(super) fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// First descendant text accepted by `accept`, trying each selector in turn.
///
/// Only the first match of each selector is considered.
fn first_text<F>(element: ElementRef<'_>, selectors: &[Selector], accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    selectors.iter().find_map(|selector| {
        element
            .select(selector)
            .next()
            .map(element_text)
            .filter(|text| accept(text))
    })
}

/// Heading-like title: non-empty and shorter than 100 characters.
pub(super) fn first_title(element: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    first_text(element, selectors, |text| {
        !text.is_empty() && text.chars().count() < MAX_TITLE_CHARS
    })
}

/// Sum of item-like descendant matches, floored at 1.
pub(super) fn count_items(element: ElementRef<'_>, selectors: &[Selector]) -> usize {
    selectors
        .iter()
        .map(|selector| element.select(selector).count())
        .sum::<usize>()
        .max(1)
}

fn usable_href(href: &str) -> bool {
    let href = href.trim();
    !href.is_empty() && href != "#" && !href.to_ascii_lowercase().starts_with("javascript:")
}

/// Absolute form of an href found on the results page.
pub(super) fn resolve_href(href: &str) -> Option<String> {
    let href = href.trim();
    if !usable_href(href) {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    Url::parse(ENGINE_BASE)
        .ok()?
        .join(href)
        .ok()
        .map(String::from)
}

/// Absolute http(s) URL whose host is not the search engine itself.
pub(super) fn is_external(href: &str) -> bool {
    let href = href.trim();
    if !(href.starts_with("http://") || href.starts_with("https://")) {
        return false;
    }
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    match url.host_str() {
        Some(host) => host != ENGINE_HOST && !host.ends_with(&format!(".{ENGINE_HOST}")),
        None => false,
    }
}

/// External anchor first, else the first usable anchor resolved against the engine.
fn pick_url<'a, I>(anchors: I) -> Option<String>
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    let hrefs: Vec<&str> = anchors
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .collect();

    hrefs
        .iter()
        .find(|href| is_external(href))
        .map(|href| href.trim().to_string())
        .or_else(|| hrefs.iter().find_map(|href| resolve_href(href)))
}

/// Outbound URL of a section.
pub(super) fn extract_url(element: ElementRef<'_>) -> Option<String> {
    pick_url(element.select(&LINK_SELECTOR))
}

/// Naver web search for free text (feeds without a usable link point here).
pub(super) fn naver_web_search_url(text: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(text.as_bytes()).collect();
    format!("{ENGINE_BASE}?where=web&sm=tab_jum&query={query}")
}

/// Titles that are toolbar or button labels rather than section names.
pub(super) fn is_ui_chrome(title: &str) -> bool {
    let lower = title.trim().to_lowercase();
    if UI_CHROME.iter().any(|ui| lower.contains(ui)) {
        return true;
    }
    // byte length: two-syllable Hangul titles (6 bytes) survive
    if lower.len() <= 3 {
        return true;
    }
    PUNCTUATION_ONLY.is_match(&lower)
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Feed entries of a section: deduplicated by (title, url), at most 10.
pub(super) fn extract_feeds(element: ElementRef<'_>, selectors: &[Selector]) -> Vec<Feed> {
    let mut feeds: Vec<Feed> = Vec::new();

    for selector in selectors {
        for item in element.select(selector) {
            let Some(feed) = extract_feed(item) else {
                continue;
            };
            if !feeds
                .iter()
                .any(|f| f.title == feed.title && f.url == feed.url)
            {
                feeds.push(feed);
            }
        }
    }

    feeds.truncate(MAX_FEEDS);
    feeds
}

/// Read one feed item; `None` when it has no title of at least 3 characters.
pub(super) fn extract_feed(item: ElementRef<'_>) -> Option<Feed> {
    let is_anchor = item.value().name() == "a";

    let title = first_text(item, &FEED_TITLES, |text| {
        let len = text.chars().count();
        len > 2 && len < MAX_FEED_CANDIDATE_CHARS
    })
    .unwrap_or_else(|| element_text(item));
    let title = truncate_chars(&title, MAX_TITLE_CHARS);
    if title.chars().count() < 3 {
        return None;
    }

    let own = is_anchor.then_some(item);
    let url = pick_url(own.into_iter().chain(item.select(&LINK_SELECTOR)))
        .unwrap_or_else(|| naver_web_search_url(&element_text(item)));

    let description = first_text(item, &FEED_DESCRIPTIONS, |text| {
        !text.is_empty() && text.chars().count() < MAX_FEED_DESC_CHARS
    });
    let publish_date = first_text(item, &FEED_DATES, |text| !text.is_empty());
    let author = first_text(item, &FEED_AUTHORS, |text| !text.is_empty());
    let thumbnail = item
        .select(&IMG_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(resolve_href);

    Some(Feed {
        title,
        url,
        description,
        publish_date,
        author,
        thumbnail,
    })
}
