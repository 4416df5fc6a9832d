use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use super::types::KeywordCount;
use crate::error::{KwError, Result};
use crate::tools::fetch::{fetch_page, FetchProfile, FetchStrategy};
use crate::tools::format::{format_compact, parse_count};
use crate::tools::types::SearchCount;

const GOOGLE_SEARCH: &str = "https://www.google.com/search";
const BETWEEN_KEYWORDS: Duration = Duration::from_secs(2);

/// Result-stats phrasings, Korean and English interface, tried in order.
static RESULT_COUNT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"약 ([0-9,]+)개 결과",
        r"About ([0-9,]+) results",
        r"([0-9,]+) results",
        r"약 ([0-9,]+)개",
        r"Results: ([0-9,]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn search_url(base: &str, keyword: &str, hl: &str, gl: &str) -> String {
    format!(
        "{base}?q={}&hl={}&gl={}&num=10",
        encode(keyword),
        encode(hl),
        encode(gl)
    )
}

/// Google web search URL for `keyword` (10 results per page).
pub fn google_search_url(keyword: &str, hl: &str, gl: &str) -> String {
    search_url(GOOGLE_SEARCH, keyword, hl, gl)
}

/// Result count from the result-stats line of a Google SERP.
pub fn extract_result_count(html: &str) -> Option<u64> {
    RESULT_COUNT_PATTERNS.iter().find_map(|re| {
        re.captures(html)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_count(m.as_str()))
    })
}

/// Result counts scraped from the Google SERP itself.
#[derive(Debug, Clone)]
pub struct GoogleSerpCounter {
    base_url: String,
    delay: Duration,
}

impl Default for GoogleSerpCounter {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_SEARCH.to_string(),
            delay: BETWEEN_KEYWORDS,
        }
    }
}

impl GoogleSerpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pause between keywords in [`count_many`](Self::count_many).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Result count for one keyword, formatted compactly (`1.2M`).
    pub async fn count(&self, keyword: &str, hl: &str, gl: &str) -> Result<SearchCount> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KwError::invalid("keyword is empty"));
        }

        let url = search_url(&self.base_url, keyword, hl, gl);
        let page = fetch_page(&url, FetchProfile::Desktop, FetchStrategy::Fast).await?;
        let total = extract_result_count(&page.html).ok_or_else(|| {
            KwError::NotFound(format!("no result count on the google serp for {keyword}"))
        })?;

        tracing::info!(keyword, hl, gl, total, "google serp count");
        Ok(SearchCount {
            total,
            formatted: format_compact(total),
        })
    }

    /// Count keywords one after another, pausing between requests.
    ///
    /// A failing keyword is reported in its entry and does not stop the rest.
    pub async fn count_many(&self, keywords: &[String], hl: &str, gl: &str) -> Vec<KeywordCount> {
        let mut results = Vec::with_capacity(keywords.len());

        for (idx, keyword) in keywords.iter().enumerate() {
            if idx > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let entry = match self.count(keyword, hl, gl).await {
                Ok(count) => KeywordCount {
                    keyword: keyword.clone(),
                    count: Some(count),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(keyword = %keyword, error = %e, "google serp count failed");
                    KeywordCount {
                        keyword: keyword.clone(),
                        count: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(entry);
        }

        results
    }
}
