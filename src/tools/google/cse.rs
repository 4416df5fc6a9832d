use reqwest::Client;
use serde_json::Value;

use super::types::*;
use crate::config::{CseCredentials, CseStatus};
use crate::error::{KwError, Result};
use crate::tools::fetch::build_api_client;
use crate::tools::serp::{Section, SectionType};
use crate::tools::types::SearchCount;

const CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const MAX_NUM: u32 = 10;

/// Google Custom Search JSON API client.
#[derive(Debug, Clone)]
pub struct CseClient {
    http: Client,
    credentials: CseCredentials,
    endpoint: String,
}

impl CseClient {
    pub fn new(credentials: CseCredentials) -> Result<Self> {
        Ok(Self {
            http: build_api_client()?,
            credentials,
            endpoint: CSE_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn status(&self) -> CseStatus {
        self.credentials.status()
    }

    async fn request(&self, params: Vec<(&str, String)>) -> Result<CseResponse> {
        let (api_key, engine_id) = self.credentials.pair()?;

        let mut query = vec![("key", api_key.to_string()), ("cx", engine_id.to_string())];
        query.extend(params);

        let response = self.http.get(&self.endpoint).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| KwError::parse(format!("cse response is not json: {e}")))?;

        if let Some(error) = value.get("error") {
            let code = error
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(status.as_u16());
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(KwError::Api {
                status: code,
                message,
            });
        }
        if !status.is_success() {
            return Err(KwError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Web results for `query`; `num` is clamped to 1..=10.
    pub async fn search_web(&self, query: &str, hl: &str, num: u32) -> Result<CseResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(KwError::invalid("query is empty"));
        }

        let num = num.clamp(1, MAX_NUM);
        tracing::debug!(query, hl, num, "cse search");
        self.request(vec![
            ("q", query.to_string()),
            ("hl", hl.to_string()),
            ("num", num.to_string()),
        ])
        .await
    }

    /// Estimated total for `keyword` restricted to a language and country.
    pub async fn total_results(
        &self,
        keyword: &str,
        lang: &str,
        country: &str,
    ) -> Result<SearchCount> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KwError::invalid("keyword is empty"));
        }

        let response = self
            .request(vec![
                ("q", keyword.to_string()),
                ("lr", format!("lang_{}", lang.to_ascii_lowercase())),
                ("cr", format!("country{}", country.to_ascii_uppercase())),
                ("num", "1".to_string()),
            ])
            .await?;

        let total = response
            .total_results()
            .ok_or_else(|| KwError::parse("cse response has no searchInformation.totalResults"))?;
        tracing::info!(keyword, lang, country, total, "cse total results");
        Ok(SearchCount::thousands(total))
    }

    /// Total for a Korean-interface query, 0 when the API omits it.
    pub async fn document_count(&self, keyword: &str) -> Result<u64> {
        let response = self.search_web(keyword, "ko", 1).await?;
        Ok(response.total_results().unwrap_or(0))
    }
}

pub(super) fn interface_language(lang: &str) -> &'static str {
    if lang.eq_ignore_ascii_case("en") {
        "en"
    } else {
        "ko"
    }
}

/// One `web` section per CSE result, in result order.
pub async fn analyze_cse(client: &CseClient, keyword: &str, lang: &str) -> Result<SectionsReport> {
    let response = client
        .search_web(keyword, interface_language(lang), MAX_NUM)
        .await?;

    let sections = response
        .items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            Section::listing(
                idx + 1,
                SectionType::Web,
                item.title.unwrap_or_else(|| "-".to_string()),
                item.link,
            )
        })
        .collect();

    Ok(SectionsReport::new(keyword.trim(), None, sections))
}
