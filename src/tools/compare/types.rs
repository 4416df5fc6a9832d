use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which engines to count documents on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Naver,
    Google,
    #[default]
    Both,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Naver => "naver",
            Engine::Google => "google",
            Engine::Both => "both",
        }
    }

    pub fn includes_naver(&self) -> bool {
        matches!(self, Engine::Naver | Engine::Both)
    }

    pub fn includes_google(&self) -> bool {
        matches!(self, Engine::Google | Engine::Both)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naver" => Ok(Engine::Naver),
            "google" => Ok(Engine::Google),
            "both" | "all" => Ok(Engine::Both),
            other => Err(format!("unknown engine '{other}' (naver, google, both)")),
        }
    }
}

/// Count reported by one engine. A failed lookup counts 0 and carries its error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineResult {
    pub name: String,
    pub document_count: u64,
    pub search_time_ms: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub naver_count: u64,
    pub google_count: u64,
    pub difference: u64,
    pub higher_engine: String,
    /// naver / google, 0 unless both are positive
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub keyword: String,
    pub engine: Engine,
    pub engines: Vec<EngineResult>,
    pub comparison: Option<Comparison>,
    pub total_documents: u64,
    pub analysis_time: String,
}
