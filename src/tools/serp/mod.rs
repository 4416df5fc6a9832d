//! SERP section classification.
//!
//! A results page is read by an ordered battery of structural probes
//! (powerlink, web, subject boxes, service blocks, verticals). Every block a
//! probe matches becomes a [`Section`] with a type, a title, an item count and
//! a priority derived from detection order. The classifier is pure: fixed HTML
//! in, fixed sections out.

mod insight;
mod probes;
mod utils;

pub mod types;

pub use insight::{normalize_type, seo_insight};
pub use types::*;

use scraper::{ElementRef, Html};

use crate::error::{KwError, Result};
use crate::tools::fetch::{fetch_page, FetchStrategy};
use probes::{Probe, FALLBACK, PRIMARY};
use utils::*;

/// A block matched by a probe, before ordering.
struct Detected {
    raw_kind: &'static str,
    title: String,
    item_count: usize,
    url: Option<String>,
    feeds: Vec<Feed>,
    description: String,
}

impl Detected {
    fn into_section(self, order: usize) -> Section {
        let section_type = normalize_type(SectionType::from_raw(self.raw_kind), &self.title);
        let priority = Priority::from_order(order);
        Section {
            order,
            section_type,
            title: self.title,
            item_count: Some(self.item_count),
            url: self.url,
            feeds: self.feeds,
            description: Some(self.description),
            seo_insight: Some(seo_insight(section_type, priority).to_string()),
            priority: Some(priority),
        }
    }
}

/// Classify the blocks of a results page, in detection order.
///
/// Sections are deduplicated by title. The looser fallback battery only runs
/// when the primary battery finds nothing.
///
/// # Examples
/// ```
/// use kwlens::tools::serp::{classify_sections, SectionType};
///
/// let html = r#"<div class="api_subject_bx"><h2 class="api_subject_txt">뉴스</h2>
///     <ul><li><a href="https://news.example.com/1">Headline one</a></li></ul></div>"#;
/// let sections = classify_sections(html);
/// assert_eq!(sections[0].section_type, SectionType::News);
/// ```
pub fn classify_sections(html: &str) -> Vec<Section> {
    let document = Html::parse_document(html);
    let mut found: Vec<Detected> = Vec::new();

    for probe in PRIMARY.iter() {
        run_probe(&document, probe, &mut found);
    }

    if found.is_empty() {
        tracing::debug!("no structural sections, running fallback probes");
        run_probe(&document, &FALLBACK, &mut found);
    }

    found
        .into_iter()
        .enumerate()
        .map(|(idx, detected)| detected.into_section(idx + 1))
        .collect()
}

fn run_probe(document: &Html, probe: &Probe, found: &mut Vec<Detected>) {
    for target in &probe.targets {
        for element in document.select(target) {
            let Some(detected) = analyze(element, probe) else {
                continue;
            };
            if probe.recipe.reject_chrome && is_ui_chrome(&detected.title) {
                continue;
            }
            if found.iter().any(|f| f.title == detected.title) {
                continue;
            }
            tracing::trace!(kind = detected.raw_kind, title = %detected.title, "section");
            found.push(detected);
        }
    }
}

fn analyze(element: ElementRef<'_>, probe: &Probe) -> Option<Detected> {
    let recipe = &probe.recipe;

    let title = first_title(element, &recipe.titles).or_else(|| recipe.label.resolve(element))?;
    let item_count = count_items(element, &recipe.items);
    let raw_kind = recipe.kind.resolve(element, &title);
    let url = if recipe.link {
        extract_url(element)
    } else {
        None
    };
    let feeds = if recipe.feeds.is_empty() {
        Vec::new()
    } else {
        extract_feeds(element, &recipe.feeds)
    };
    let description = recipe.describe.render(element, raw_kind, item_count);

    Some(Detected {
        raw_kind,
        title,
        item_count,
        url,
        feeds,
        description,
    })
}

/// Naver search URL for a keyword on the given front end.
pub fn naver_search_url(keyword: &str, mode: SerpMode) -> String {
    let query: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
    match mode {
        SerpMode::Pc => format!(
            "https://search.naver.com/search.naver?where=nexearch&sm=top_hty&fbm=0&ie=utf8&query={query}"
        ),
        SerpMode::Mobile => format!(
            "https://m.search.naver.com/search.naver?where=m&sm=mtp_hty.top&ie=utf8&query={query}"
        ),
    }
}

/// Fetch the Naver results page for `keyword` and classify its sections.
pub async fn analyze_naver_serp(keyword: &str, mode: SerpMode) -> Result<SerpReport> {
    let url = naver_search_url(keyword.trim(), mode);
    analyze_serp_at(keyword, mode, &url).await
}

pub(crate) async fn analyze_serp_at(
    keyword: &str,
    mode: SerpMode,
    url: &str,
) -> Result<SerpReport> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(KwError::invalid("keyword is empty"));
    }

    let page = fetch_page(url, mode.profile(), FetchStrategy::Adaptive).await?;
    let sections = classify_sections(&page.html);
    tracing::info!(
        keyword,
        mode = %mode,
        sections = sections.len(),
        duration_ms = page.duration_ms,
        "naver serp analyzed"
    );

    Ok(SerpReport {
        keyword: keyword.to_string(),
        search_url: url.to_string(),
        mode,
        total_sections: sections.len(),
        sections,
        analysis_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}
