//! Google Ads Keyword Planner: keyword ideas with search volume and bids.
//!
//! Talks to the REST interface of the Google Ads API. An access token is
//! minted from the stored refresh token on every call.

mod tests;

pub mod types;

pub use types::*;

use chrono::{Datelike, NaiveDate};
use reqwest::Client;

use crate::config::AdsCredentials;
use crate::error::{KwError, Result};
use crate::tools::fetch::build_api_client;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const ADS_API_BASE: &str = "https://googleads.googleapis.com";
const API_VERSION: &str = "v21";

/// Build the planner request body.
///
/// Keywords seed the ideas, a page URL seeds them from page content, and both
/// together produce a combined seed. Metrics cover the twelve months up to
/// `today`'s month.
pub fn build_idea_request(
    keywords: &[String],
    page_url: Option<&str>,
    location_ids: &[u64],
    language_id: u64,
    today: NaiveDate,
) -> Result<IdeaRequest> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();
    let page_url = page_url.map(str::trim).filter(|u| !u.is_empty());

    let (keyword_seed, url_seed, keyword_and_url_seed) = match (keywords.is_empty(), page_url) {
        (true, None) => return Err(KwError::invalid("provide keywords or a page url")),
        (true, Some(url)) => {
            let seed = UrlSeed {
                url: url.to_string(),
            };
            (None, Some(seed), None)
        }
        (false, None) => (Some(KeywordSeed { keywords }), None, None),
        (false, Some(url)) => {
            let seed = KeywordAndUrlSeed {
                url: url.to_string(),
                keywords,
            };
            (None, None, Some(seed))
        }
    };

    Ok(IdeaRequest {
        language: format!("languageConstants/{language_id}"),
        geo_target_constants: location_ids
            .iter()
            .map(|id| format!("geoTargetConstants/{id}"))
            .collect(),
        keyword_plan_network: "GOOGLE_SEARCH",
        include_adult_keywords: false,
        historical_metrics_options: HistoricalMetricsOptions {
            year_month_range: YearMonthRange {
                start: YearMonth {
                    year: today.year() - 1,
                    month: today.month(),
                },
                end: YearMonth {
                    year: today.year(),
                    month: today.month(),
                },
            },
        },
        keyword_seed,
        url_seed,
        keyword_and_url_seed,
    })
}

/// Google Ads API client for keyword planning.
#[derive(Debug, Clone)]
pub struct AdsClient {
    http: Client,
    credentials: AdsCredentials,
    token_url: String,
    api_base: String,
}

impl AdsClient {
    pub fn new(credentials: AdsCredentials) -> Result<Self> {
        Ok(Self {
            http: build_api_client()?,
            credentials,
            token_url: TOKEN_URL.to_string(),
            api_base: ADS_API_BASE.to_string(),
        })
    }

    /// Override the OAuth and API hosts (mock servers in tests).
    pub fn with_endpoints(
        mut self,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        self.token_url = token_url.into();
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Exchange the refresh token for an access token.
    pub async fn access_token(&self) -> Result<String> {
        let form = [
            ("client_id", self.credentials.client_id()?),
            ("client_secret", self.credentials.client_secret()?),
            ("refresh_token", self.credentials.refresh_token()?),
            ("grant_type", "refresh_token"),
        ];

        let response = self.http.post(&self.token_url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(KwError::Auth(format!("HTTP {}: {body}", status.as_u16())));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| KwError::Auth("token response has no access_token".to_string()))
    }

    /// Keyword ideas for keyword and/or page seeds.
    pub async fn generate_keyword_ideas(
        &self,
        keywords: &[String],
        page_url: Option<&str>,
        location_ids: &[u64],
        language_id: u64,
    ) -> Result<Vec<KeywordIdea>> {
        let today = chrono::Local::now().date_naive();
        let request = build_idea_request(keywords, page_url, location_ids, language_id, today)?;
        let customer_id = self.credentials.customer_id()?;
        let developer_token = self.credentials.developer_token()?;
        let access_token = self.access_token().await?;

        let url = format!(
            "{}/{API_VERSION}/customers/{customer_id}:generateKeywordIdeas",
            self.api_base
        );
        let mut builder = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .header("developer-token", developer_token)
            .json(&request);
        if let Some(login) = self.credentials.login_customer_id() {
            builder = builder.header("login-customer-id", login);
        }

        tracing::debug!(%customer_id, seeds = keywords.len(), "generate keyword ideas");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<AdsErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(KwError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: IdeasResponse = serde_json::from_str(&body)?;
        let ideas: Vec<KeywordIdea> = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(KeywordIdea::from)
            .collect();

        tracing::info!(ideas = ideas.len(), "keyword ideas generated");
        Ok(ideas)
    }
}
