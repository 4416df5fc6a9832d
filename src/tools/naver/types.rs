use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::tools::clean::clean_snippet;
use crate::tools::types::BlogItem;

/// Open API search vertical (the `{vertical}` in `/v1/search/{vertical}.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Vertical {
    #[serde(rename = "blog")]
    Blog,
    #[serde(rename = "news")]
    News,
    #[serde(rename = "cafearticle")]
    Cafe,
    #[serde(rename = "kin")]
    Kin,
    #[default]
    #[serde(rename = "webkr")]
    Web,
    #[serde(rename = "shop")]
    Shop,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "encyc")]
    Encyclopedia,
    #[serde(rename = "book")]
    Book,
}

impl Vertical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vertical::Blog => "blog",
            Vertical::News => "news",
            Vertical::Cafe => "cafearticle",
            Vertical::Kin => "kin",
            Vertical::Web => "webkr",
            Vertical::Shop => "shop",
            Vertical::Image => "image",
            Vertical::Encyclopedia => "encyc",
            Vertical::Book => "book",
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vertical {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blog" => Ok(Vertical::Blog),
            "news" => Ok(Vertical::News),
            "cafe" | "cafearticle" => Ok(Vertical::Cafe),
            "kin" => Ok(Vertical::Kin),
            "web" | "webkr" => Ok(Vertical::Web),
            "shop" | "shopping" => Ok(Vertical::Shop),
            "image" => Ok(Vertical::Image),
            "encyc" => Ok(Vertical::Encyclopedia),
            "book" => Ok(Vertical::Book),
            other => Err(format!("unknown naver vertical: {other}")),
        }
    }
}

/// Result ordering for the Open API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    /// Relevance
    #[default]
    Sim,
    Date,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Sim => "sim",
            Sort::Date => "date",
        }
    }
}

/// Body of a `/v1/search/*.json` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverSearchResponse {
    #[serde(default)]
    pub last_build_date: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub display: Option<u64>,
    #[serde(default)]
    pub items: Vec<NaverItem>,
}

/// One Open API item; vertical-specific fields land in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NaverItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&NaverItem> for BlogItem {
    fn from(item: &NaverItem) -> Self {
        BlogItem {
            title: clean_snippet(&item.title),
            link: item.link.clone(),
            description: clean_snippet(&item.description),
        }
    }
}

/// Error body returned by the Open API on non-200 responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NaverApiError {
    pub error_message: Option<String>,
    pub error_code: Option<String>,
}
