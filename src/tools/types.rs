//! Common types shared across tools

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::tools::format::{format_thousands, parse_count};

/// A result total as reported by a search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCount {
    pub total: u64,
    /// Human-readable rendition of `total`
    pub formatted: String,
}

impl SearchCount {
    /// Total with thousands separators (`1,234,567`).
    pub fn thousands(total: u64) -> Self {
        Self {
            total,
            formatted: format_thousands(total),
        }
    }
}

/// A blog listing entry: Open API result or scraped SERP item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
}

/// Deserialize an integer that Google APIs may send as a JSON string.
///
/// Null or missing values become 0.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_u64_opt(deserializer)?.unwrap_or(0))
}

/// Like [`lenient_u64`], keeping null as `None`.
pub(crate) fn lenient_u64_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))),
        Value::String(s) => parse_count(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("not an integer: {s:?}"))),
        other => Err(de::Error::custom(format!("expected integer, got {other}"))),
    }
}
