use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::tools::serp::Section;
use crate::tools::types::{lenient_u64_opt, SearchCount};

/// Custom Search JSON API response (the fields this crate reads).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CseResponse {
    #[serde(default)]
    pub items: Vec<CseItem>,
    #[serde(default)]
    pub search_information: Option<SearchInformation>,
}

impl CseResponse {
    pub fn total_results(&self) -> Option<u64> {
        self.search_information.as_ref()?.total_results
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CseItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub display_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    /// Sent as a string by the API
    #[serde(default, deserialize_with = "lenient_u64_opt")]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub search_time: Option<f64>,
}

/// Device the WebScrapingAPI SERP is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
    Tablet,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Mobile => "mobile",
            Device::Tablet => "tablet",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" | "pc" => Ok(Device::Desktop),
            "mobile" | "mo" => Ok(Device::Mobile),
            "tablet" => Ok(Device::Tablet),
            other => Err(format!("unknown device: {other}")),
        }
    }
}

/// WebScrapingAPI SERP response (organic and image blocks).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WsaResponse {
    #[serde(default)]
    pub organic_results: Vec<WsaResult>,
    #[serde(default)]
    pub images_results: Vec<WsaResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WsaResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Full-size image URL (image results only)
    #[serde(default)]
    pub original: Option<String>,
}

/// Flat list of listing sections built from a JSON SERP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsReport {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    pub sections: Vec<Section>,
    pub total_sections: usize,
}

impl SectionsReport {
    pub(super) fn new(keyword: &str, device: Option<Device>, sections: Vec<Section>) -> Self {
        Self {
            keyword: keyword.to_string(),
            device,
            total_sections: sections.len(),
            sections,
        }
    }
}

/// Outcome of one keyword in a batch count.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<SearchCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
