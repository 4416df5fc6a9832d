use reqwest::Client;
use serde_json::Value;

use super::cse::interface_language;
use super::types::*;
use crate::error::{KwError, Result};
use crate::tools::fetch::build_api_client;
use crate::tools::serp::{Section, SectionType};

const WSA_ENDPOINT: &str = "https://serpapi.webscrapingapi.com/v2";

/// WebScrapingAPI SERP client (Google engine).
#[derive(Debug, Clone)]
pub struct WsaClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl WsaClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: build_api_client()?,
            api_key: api_key.into(),
            endpoint: WSA_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub async fn search(
        &self,
        keyword: &str,
        device: Device,
        gl: &str,
        hl: &str,
    ) -> Result<WsaResponse> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KwError::invalid("keyword is empty"));
        }

        tracing::debug!(keyword, %device, gl, hl, "webscrapingapi search");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("api_key", self.api_key.as_str()),
                ("q", keyword),
                ("device", device.as_str()),
                ("gl", gl),
                ("hl", hl),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| KwError::parse(format!("webscrapingapi response is not json: {e}")))?;

        if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            };
            return Err(KwError::Api {
                status: status.as_u16(),
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
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Organic results as `web` sections, then image results as `image` sections.
///
/// `lang == "en"` queries the US English interface, anything else Korea/Korean.
pub async fn analyze_wsa(
    client: &WsaClient,
    keyword: &str,
    device: Device,
    lang: &str,
) -> Result<SectionsReport> {
    let hl = interface_language(lang);
    let gl = if hl == "en" { "us" } else { "kr" };
    let response = client.search(keyword, device, gl, hl).await?;

    let organic = response
        .organic_results
        .into_iter()
        .map(|item| (SectionType::Web, item.title, item.link));
    let images = response
        .images_results
        .into_iter()
        .map(|item| (SectionType::Image, item.title, item.original.or(item.link)));

    let sections = organic
        .chain(images)
        .enumerate()
        .map(|(idx, (section_type, title, url))| {
            Section::listing(
                idx + 1,
                section_type,
                title.unwrap_or_else(|| "-".to_string()),
                url,
            )
        })
        .collect();

    Ok(SectionsReport::new(keyword.trim(), Some(device), sections))
}
