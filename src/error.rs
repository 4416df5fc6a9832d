use thiserror::Error;

pub type Result<T> = std::result::Result<T, KwError>;

#[derive(Debug, Error)]
pub enum KwError {
    #[error("http request failed: {0}")]
    Http(String),

    #[error("status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("api error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("oauth token refresh failed: {0}")]
    Auth(String),

    #[error("missing credential: {0}")]
    MissingCredentials(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KwError {
    pub fn parse(what: impl Into<String>) -> Self {
        KwError::Parse(what.into())
    }

    pub fn invalid(what: impl Into<String>) -> Self {
        KwError::InvalidInput(what.into())
    }
}

/* Conversions so `?` works smoothly */
impl From<reqwest::Error> for KwError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => KwError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => KwError::Http(e.to_string()),
        }
    }
}

impl From<url::ParseError> for KwError {
    fn from(e: url::ParseError) -> Self {
        KwError::InvalidInput(format!("invalid url: {e}"))
    }
}
