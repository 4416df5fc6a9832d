//! Credentials and settings read from the environment (and an optional `.env`).

use crate::error::{KwError, Result};
use serde::Serialize;
use std::path::Path;

pub const NAVER_CLIENT_ID: &str = "QUANTITY_NAVER_CLIENT_ID";
pub const NAVER_CLIENT_SECRET: &str = "QUANTITY_NAVER_CLIENT_SECRET";
pub const CSE_API_KEY: &str = "QUANTITY_GOOGLE_CUSTOM_SEARCH_API_KEY";
pub const CSE_ENGINE_ID: &str = "QUANTITY_GOOGLE_CUSTOM_SEARCH_ENGINE_ID";
pub const ADS_DEVELOPER_TOKEN: &str = "GOOGLE_ADS_DEVELOPER_TOKEN";
pub const ADS_CLIENT_ID: &str = "GOOGLE_ADS_CLIENT_ID";
pub const ADS_CLIENT_SECRET: &str = "GOOGLE_ADS_CLIENT_SECRET";
pub const ADS_REFRESH_TOKEN: &str = "GOOGLE_ADS_REFRESH_TOKEN";
pub const ADS_CUSTOMER_ID: &str = "GOOGLE_ADS_CUSTOMER_ID";
pub const ADS_LOGIN_CUSTOMER_ID: &str = "GOOGLE_ADS_LOGIN_CUSTOMER_ID";
pub const WSA_API_KEY: &str = "WEBSCRAPINGAPI_API_KEY";

/// Naver Open API application credentials.
#[derive(Debug, Clone, Default)]
pub struct NaverCredentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl NaverCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: non_empty(Some(client_id.into())),
            client_secret: non_empty(Some(client_secret.into())),
        }
    }

    pub fn status(&self) -> NaverStatus {
        NaverStatus {
            client_id_set: self.client_id.is_some(),
            client_secret_set: self.client_secret.is_some(),
        }
    }

    /// Both halves of the key pair, or the name of the first missing variable.
    pub fn pair(&self) -> Result<(&str, &str)> {
        let id = self
            .client_id
            .as_deref()
            .ok_or(KwError::MissingCredentials(NAVER_CLIENT_ID))?;
        let secret = self
            .client_secret
            .as_deref()
            .ok_or(KwError::MissingCredentials(NAVER_CLIENT_SECRET))?;
        Ok((id, secret))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NaverStatus {
    pub client_id_set: bool,
    pub client_secret_set: bool,
}

/// Google Custom Search Engine credentials.
#[derive(Debug, Clone, Default)]
pub struct CseCredentials {
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
}

impl CseCredentials {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: non_empty(Some(api_key.into())),
            engine_id: non_empty(Some(engine_id.into())),
        }
    }

    pub fn status(&self) -> CseStatus {
        CseStatus {
            api_key_set: self.api_key.is_some(),
            search_engine_id_set: self.engine_id.is_some(),
        }
    }

    pub fn pair(&self) -> Result<(&str, &str)> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(KwError::MissingCredentials(CSE_API_KEY))?;
        let cx = self
            .engine_id
            .as_deref()
            .ok_or(KwError::MissingCredentials(CSE_ENGINE_ID))?;
        Ok((key, cx))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CseStatus {
    pub api_key_set: bool,
    pub search_engine_id_set: bool,
}

/// Google Ads API (Keyword Planner) credentials.
#[derive(Debug, Clone, Default)]
pub struct AdsCredentials {
    pub developer_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub customer_id: Option<String>,
    pub login_customer_id: Option<String>,
}

impl AdsCredentials {
    pub fn developer_token(&self) -> Result<&str> {
        required(&self.developer_token, ADS_DEVELOPER_TOKEN)
    }

    pub fn client_id(&self) -> Result<&str> {
        required(&self.client_id, ADS_CLIENT_ID)
    }

    pub fn client_secret(&self) -> Result<&str> {
        required(&self.client_secret, ADS_CLIENT_SECRET)
    }

    pub fn refresh_token(&self) -> Result<&str> {
        required(&self.refresh_token, ADS_REFRESH_TOKEN)
    }

    /// Customer id with the dashes the Ads UI displays removed.
    pub fn customer_id(&self) -> Result<String> {
        required(&self.customer_id, ADS_CUSTOMER_ID).map(|id| id.replace('-', ""))
    }

    pub fn login_customer_id(&self) -> Option<String> {
        self.login_customer_id
            .as_ref()
            .map(|id| id.replace('-', ""))
    }

    pub fn is_complete(&self) -> bool {
        self.developer_token.is_some()
            && self.client_id.is_some()
            && self.client_secret.is_some()
            && self.refresh_token.is_some()
            && self.customer_id.is_some()
    }
}

/// All credentials the tools may need.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub naver: NaverCredentials,
    pub cse: CseCredentials,
    pub ads: AdsCredentials,
    pub wsa_api_key: Option<String>,
}

/// Which credentials are present, for `kwlens status`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsStatus {
    pub naver: NaverStatus,
    pub cse: CseStatus,
    pub google_ads: bool,
    pub webscrapingapi: bool,
}

impl Settings {
    /// Load `.env` (explicit path, else the working directory), then read the environment.
    ///
    /// Variables already present in the process environment win over the file.
    /// A missing default `.env` is fine; a missing explicit one is an error.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    KwError::Config(format!("failed to load {}: {e}", path.display()))
                })?;
            }
            None => match dotenvy::dotenv() {
                Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
                Err(e) if e.not_found() => {}
                Err(e) => return Err(KwError::Config(e.to_string())),
            },
        }
        Ok(Self::from_env())
    }

    /// Read settings from the current process environment only.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        Self {
            naver: NaverCredentials {
                client_id: get(NAVER_CLIENT_ID),
                client_secret: get(NAVER_CLIENT_SECRET),
            },
            cse: CseCredentials {
                api_key: get(CSE_API_KEY),
                engine_id: get(CSE_ENGINE_ID),
            },
            ads: AdsCredentials {
                developer_token: get(ADS_DEVELOPER_TOKEN),
                client_id: get(ADS_CLIENT_ID),
                client_secret: get(ADS_CLIENT_SECRET),
                refresh_token: get(ADS_REFRESH_TOKEN),
                customer_id: get(ADS_CUSTOMER_ID),
                login_customer_id: get(ADS_LOGIN_CUSTOMER_ID),
            },
            wsa_api_key: get(WSA_API_KEY),
        }
    }

    pub fn wsa_api_key(&self) -> Result<&str> {
        required(&self.wsa_api_key, WSA_API_KEY)
    }

    pub fn status(&self) -> SettingsStatus {
        SettingsStatus {
            naver: self.naver.status(),
            cse: self.cse.status(),
            google_ads: self.ads.is_complete(),
            webscrapingapi: self.wsa_api_key.is_some(),
        }
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(KwError::MissingCredentials(name))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|v| !v.is_empty())
}
