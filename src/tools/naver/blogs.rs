use scraper::Html;

use super::utils::*;
use crate::error::{KwError, Result};
use crate::tools::batch::batch_ordered;
use crate::tools::fetch::{
    fetch_page, fetch_page_with_referer, FetchProfile, FetchResult, FetchStrategy,
};
use crate::tools::types::BlogItem;

const MOBILE_SERP: &str = "https://m.search.naver.com/search.naver";
const DESKTOP_SERP: &str = "https://search.naver.com/search.naver";
const MOBILE_REFERER: &str = "https://m.search.naver.com/";
const DESKTOP_REFERER: &str = "https://search.naver.com/";

const ENRICH_CONCURRENCY: usize = 4;

/// Scrapes the Naver blog SERP for top posts.
///
/// The mobile blog results are tried first since their markup is simpler;
/// the desktop blog tab is the fallback when the mobile fetch fails.
#[derive(Debug, Clone)]
pub struct BlogScraper {
    mobile_base: String,
    desktop_base: String,
    enrich: bool,
}

impl Default for BlogScraper {
    fn default() -> Self {
        Self {
            mobile_base: MOBILE_SERP.to_string(),
            desktop_base: DESKTOP_SERP.to_string(),
            enrich: true,
        }
    }
}

impl BlogScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(mut self, mobile: impl Into<String>, desktop: impl Into<String>) -> Self {
        self.mobile_base = mobile.into();
        self.desktop_base = desktop.into();
        self
    }

    /// Skip fetching each post for its meta description.
    pub fn without_descriptions(mut self) -> Self {
        self.enrich = false;
        self
    }

    pub fn mobile_url(&self, keyword: &str) -> String {
        format!(
            "{}?where=m_blog&sm=mtb_jum&query={}",
            self.mobile_base,
            encode(keyword)
        )
    }

    pub fn desktop_url(&self, keyword: &str) -> String {
        format!(
            "{}?where=post&sm=tab_jum&query={}",
            self.desktop_base,
            encode(keyword)
        )
    }

    /// Up to `count` blog posts ranking for `keyword`, in SERP order.
    pub async fn fetch_top_blogs(&self, keyword: &str, count: usize) -> Result<Vec<BlogItem>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KwError::invalid("keyword is empty"));
        }

        let mobile = self.mobile_url(keyword);
        let html = match fetch_serp(&mobile, FetchProfile::Mobile, MOBILE_REFERER).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(keyword, error = %e, "mobile blog serp failed, trying desktop");
                let desktop = self.desktop_url(keyword);
                fetch_serp(&desktop, FetchProfile::Desktop, DESKTOP_REFERER).await?
            }
        };

        let items = parse_blog_serp(&html, count);
        if items.is_empty() {
            return Err(KwError::NotFound(format!("no blog posts on the serp for {keyword}")));
        }
        tracing::info!(keyword, posts = items.len(), "blog serp parsed");

        if !self.enrich {
            return Ok(items);
        }
        Ok(enrich_descriptions(items).await)
    }
}

/// [`BlogScraper::fetch_top_blogs`] against the live Naver endpoints.
pub async fn fetch_top_blogs(keyword: &str, count: usize) -> Result<Vec<BlogItem>> {
    BlogScraper::default().fetch_top_blogs(keyword, count).await
}

fn encode(keyword: &str) -> String {
    url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect()
}

async fn fetch_serp(url: &str, profile: FetchProfile, referer: &str) -> Result<String> {
    fetch_page_with_referer(url, profile, FetchStrategy::Fast, Some(referer))
        .await
        .map(FetchResult::into_html)
}

/// Fill each item's description from its post's meta tags; items whose
/// post cannot be fetched keep an empty description.
async fn enrich_descriptions(items: Vec<BlogItem>) -> Vec<BlogItem> {
    batch_ordered(items, ENRICH_CONCURRENCY, |mut item| async move {
        match fetch_serp(&item.link, FetchProfile::Desktop, MOBILE_REFERER).await {
            Ok(html) => {
                if let Some(description) = extract_meta_description(&html) {
                    item.description = description;
                }
            }
            Err(e) => tracing::debug!(url = %item.link, error = %e, "post meta fetch failed"),
        }
        item
    })
    .await
}

/// Readable content of a Naver blog post.
///
/// Follows the page's canonical address when it points at blog.naver.com,
/// then the PostView frame if there is one, returning that frame's full HTML
/// so callers can still count images and links. Without a frame the text of
/// the post body container is returned, and failing that the whole page.
pub async fn fetch_post_content(url: &str) -> Result<String> {
    let mut page_url = url.to_string();
    let mut html = fetch_post_page(url).await?;

    let canonical = canonical_blog_url(&Html::parse_document(&html));
    if let Some(canonical) = canonical.filter(|c| c.as_str() != url) {
        match fetch_post_page(&canonical).await {
            Ok(body) => {
                html = body;
                page_url = canonical;
            }
            Err(e) => tracing::debug!(url = %canonical, error = %e, "canonical fetch failed"),
        }
    }

    let frame = post_frame_url(&Html::parse_document(&html), &page_url);
    if let Some(frame) = frame {
        match fetch_post_page(&frame).await {
            Ok(body) => return Ok(body),
            Err(e) => tracing::debug!(url = %frame, error = %e, "post frame fetch failed"),
        }
    }

    let text = extract_post_text(&Html::parse_document(&html));
    Ok(text.unwrap_or(html))
}

async fn fetch_post_page(url: &str) -> Result<String> {
    fetch_page(url, FetchProfile::Desktop, FetchStrategy::Fast)
        .await
        .map(FetchResult::into_html)
}
