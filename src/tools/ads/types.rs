use serde::{Deserialize, Serialize};

use crate::tools::types::lenient_u64;

/// Google Ads geo target for South Korea.
pub const KOREA_LOCATION_ID: u64 = 2410;
/// Google Ads language constant for Korean.
pub const KOREAN_LANGUAGE_ID: u64 = 1012;

pub const DATA_SOURCE: &str = "Google Ads API v21";

/// Competition bucket derived from the 0-100 competition index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Competition {
    Unknown,
    Low,
    Medium,
    High,
}

impl Competition {
    /// 0 → unknown, up to 33 → low, up to 66 → medium, else high.
    pub fn from_index(index: u64) -> Self {
        match index {
            0 => Competition::Unknown,
            1..=33 => Competition::Low,
            34..=66 => Competition::Medium,
            _ => Competition::High,
        }
    }
}

/// One keyword idea with its historical metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordIdea {
    pub keyword: String,
    pub avg_monthly_searches: u64,
    pub competition: Competition,
    pub competition_index: u64,
    pub low_top_of_page_bid_micros: u64,
    pub high_top_of_page_bid_micros: u64,
    pub cpc_bid_micros: u64,
    pub data_source: &'static str,
}

impl From<IdeaResult> for KeywordIdea {
    fn from(result: IdeaResult) -> Self {
        let metrics = result.keyword_idea_metrics.unwrap_or_default();
        KeywordIdea {
            keyword: result.text,
            avg_monthly_searches: metrics.avg_monthly_searches,
            competition: Competition::from_index(metrics.competition_index),
            competition_index: metrics.competition_index,
            low_top_of_page_bid_micros: metrics.low_top_of_page_bid_micros,
            high_top_of_page_bid_micros: metrics.high_top_of_page_bid_micros,
            cpc_bid_micros: metrics.average_cpc_micros,
            data_source: DATA_SOURCE,
        }
    }
}

/// Body of `customers/{id}:generateKeywordIdeas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRequest {
    pub language: String,
    pub geo_target_constants: Vec<String>,
    pub keyword_plan_network: &'static str,
    pub include_adult_keywords: bool,
    pub historical_metrics_options: HistoricalMetricsOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_seed: Option<KeywordSeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_seed: Option<UrlSeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_and_url_seed: Option<KeywordAndUrlSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalMetricsOptions {
    pub year_month_range: YearMonthRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonthRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSeed {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlSeed {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordAndUrlSeed {
    pub url: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdeasResponse {
    #[serde(default)]
    pub results: Option<Vec<IdeaResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub keyword_idea_metrics: Option<IdeaMetrics>,
}

/// int64 metrics arrive as JSON strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaMetrics {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub avg_monthly_searches: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub competition_index: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub low_top_of_page_bid_micros: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub high_top_of_page_bid_micros: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub average_cpc_micros: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdsErrorBody {
    pub error: Option<AdsErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdsErrorDetail {
    pub message: Option<String>,
}
