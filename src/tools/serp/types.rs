use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::tools::fetch::FetchProfile;

/// The fixed vocabulary of section types a SERP block can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Web,
    News,
    Blog,
    Cafe,
    Kin,
    Shopping,
    Image,
    Video,
    Dictionary,
    Powerlink,
    Related,
    Tool,
    Info,
    Unknown,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::News => "news",
            Self::Blog => "blog",
            Self::Cafe => "cafe",
            Self::Kin => "kin",
            Self::Shopping => "shopping",
            Self::Image => "image",
            Self::Video => "video",
            Self::Dictionary => "dictionary",
            Self::Powerlink => "powerlink",
            Self::Related => "related",
            Self::Tool => "tool",
            Self::Info => "info",
            Self::Unknown => "unknown",
        }
    }

    /// Map a detector's raw kind onto the vocabulary.
    ///
    /// Detectors name some blocks more finely than the vocabulary does
    /// (`book`, `stock`, `widget`...); those fold into `info`, reference kinds
    /// into `dictionary`/`kin`, utilities into `tool`. Anything else is `unknown`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "web" => Self::Web,
            "news" => Self::News,
            "blog" => Self::Blog,
            "cafe" => Self::Cafe,
            "kin" | "knowledge" => Self::Kin,
            "shopping" => Self::Shopping,
            "image" => Self::Image,
            "video" => Self::Video,
            "dictionary" | "encyclopedia" => Self::Dictionary,
            "powerlink" => Self::Powerlink,
            "related" => Self::Related,
            "tool" | "translate" | "calculator" | "unit_converter" => Self::Tool,
            "info" | "book" | "stock" | "service" | "widget" | "card" | "movie" | "music"
            | "local" | "weather" | "real_estate" => Self::Info,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority bucket derived from a section's detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// order ≤ 3 → high, ≤ 6 → medium, else low.
    pub fn from_order(order: usize) -> Self {
        match order {
            0..=3 => Self::High,
            4..=6 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// One entry inside a section (an ad, an article, a post).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub publish_date: Option<String>,
    pub author: Option<String>,
    pub thumbnail: Option<String>,
}

/// A detected block on a results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// 1-based detection order
    pub order: usize,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title: String,
    /// `None` when the source cannot tell (API listings)
    pub item_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feeds: Vec<Feed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Section {
    /// A bare listing row from a JSON API: no item count and no enrichment.
    pub fn listing(
        order: usize,
        section_type: SectionType,
        title: String,
        url: Option<String>,
    ) -> Self {
        Self {
            order,
            section_type,
            title,
            item_count: None,
            url,
            feeds: Vec::new(),
            description: None,
            seo_insight: None,
            priority: None,
        }
    }
}

/// Which Naver front end to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerpMode {
    #[default]
    Pc,
    Mobile,
}

impl SerpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Mobile => "mobile",
        }
    }

    /// Browser profile that gets served this front end.
    pub fn profile(&self) -> FetchProfile {
        match self {
            Self::Pc => FetchProfile::Desktop,
            Self::Mobile => FetchProfile::Mobile,
        }
    }
}

impl FromStr for SerpMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" | "desktop" => Ok(Self::Pc),
            "mobile" | "mo" | "m" => Ok(Self::Mobile),
            other => Err(format!("unknown mode '{other}' (expected pc or mobile)")),
        }
    }
}

impl fmt::Display for SerpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section layout of one Naver results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpReport {
    pub keyword: String,
    pub search_url: String,
    pub mode: SerpMode,
    pub sections: Vec<Section>,
    pub total_sections: usize,
    pub analysis_time: String,
}
