//! Naver Open API client and Naver page scraping.
//!
//! The Open API (`openapi.naver.com/v1/search/*`) needs an application key
//! pair. Everything else in this module reads public pages: the web SERP for
//! a document count, the blog SERP for top posts, and blog posts themselves.

mod blogs;
mod tests;
mod utils;

pub mod types;

pub use blogs::{fetch_post_content, fetch_top_blogs, BlogScraper};
pub use types::*;
pub use utils::{extract_document_count, extract_meta_description, parse_blog_serp};

use reqwest::Client;

use crate::config::{NaverCredentials, NaverStatus};
use crate::error::{KwError, Result};
use crate::tools::fetch::{build_api_client, fetch_page, FetchProfile, FetchStrategy};
use crate::tools::types::SearchCount;

const OPENAPI_BASE: &str = "https://openapi.naver.com";
const WEB_SERP_BASE: &str = "https://search.naver.com/search.naver";

const MAX_DISPLAY: u32 = 100;
const MAX_START: u32 = 1000;

/// Client for the Naver search Open API.
#[derive(Debug, Clone)]
pub struct NaverClient {
    http: Client,
    credentials: NaverCredentials,
    base_url: String,
}

impl NaverClient {
    pub fn new(credentials: NaverCredentials) -> Result<Self> {
        Ok(Self {
            http: build_api_client()?,
            credentials,
            base_url: OPENAPI_BASE.to_string(),
        })
    }

    /// Point the client at another host (a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn status(&self) -> NaverStatus {
        self.credentials.status()
    }

    /// `GET /v1/search/{vertical}.json`.
    ///
    /// `display` is clamped to 1..=100 and `start` to 1..=1000, the ranges the
    /// API accepts.
    pub async fn search(
        &self,
        vertical: Vertical,
        query: &str,
        display: u32,
        start: u32,
        sort: Sort,
    ) -> Result<NaverSearchResponse> {
        let (client_id, client_secret) = self.credentials.pair()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(KwError::invalid("query is empty"));
        }

        let page_size = display.clamp(1, MAX_DISPLAY);
        let start = start.clamp(1, MAX_START);
        let url = format!("{}/v1/search/{}.json", self.base_url, vertical.as_str());
        let params = [
            ("query", query.to_string()),
            ("display", page_size.to_string()),
            ("start", start.to_string()),
            ("sort", sort.as_str().to_string()),
        ];

        tracing::debug!(%vertical, query, page_size, start, "naver open api search");
        let response = self
            .http
            .get(&url)
            .query(&params)
            .header("X-Naver-Client-Id", client_id)
            .header("X-Naver-Client-Secret", client_secret)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Blog vertical, first page, relevance order.
    pub async fn search_blogs(&self, query: &str, display: u32) -> Result<NaverSearchResponse> {
        self.search(Vertical::Blog, query, display, 1, Sort::Sim)
            .await
    }

    /// Result total for `keyword` in one vertical (`display=1`).
    pub async fn search_count(&self, keyword: &str, vertical: Vertical) -> Result<SearchCount> {
        let response = self.search(vertical, keyword, 1, 1, Sort::Sim).await?;
        let total = response
            .total
            .ok_or_else(|| KwError::parse("naver response has no total"))?;

        tracing::info!(keyword, %vertical, total, "naver search count");
        Ok(SearchCount::thousands(total))
    }
}

fn api_error(status: u16, body: &str) -> KwError {
    let message = match serde_json::from_str::<NaverApiError>(body) {
        Ok(NaverApiError {
            error_message: Some(message),
            error_code: Some(code),
        }) => format!("{message} ({code})"),
        Ok(NaverApiError {
            error_message: Some(message),
            ..
        }) => message,
        _ => body.chars().take(200).collect(),
    };
    KwError::Api { status, message }
}

/// Document count scraped from the Naver web SERP.
#[derive(Debug, Clone)]
pub struct NaverSerpCounter {
    base_url: String,
}

impl Default for NaverSerpCounter {
    fn default() -> Self {
        Self {
            base_url: WEB_SERP_BASE.to_string(),
        }
    }
}

impl NaverSerpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn count_url(&self, keyword: &str) -> String {
        let query: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        format!(
            "{}?where=web&sm=tab_hty.top&ie=utf8&query={query}",
            self.base_url
        )
    }

    /// Number of documents the web SERP reports, 0 when the page prints none.
    pub async fn count(&self, keyword: &str) -> Result<u64> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KwError::invalid("keyword is empty"));
        }

        let url = self.count_url(keyword);
        let page = fetch_page(&url, FetchProfile::Desktop, FetchStrategy::Fast).await?;
        match extract_document_count(&page.html) {
            Some(count) => Ok(count),
            None => {
                tracing::debug!(keyword, "naver web serp shows no result total");
                Ok(0)
            }
        }
    }
}
