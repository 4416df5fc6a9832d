use serde::{Deserialize, Serialize};

/// Fetch Profiles
///
/// Each profile pairs a User-Agent with the header set that browser really sends:
/// - `Desktop` → Chrome on Windows
/// - `Mobile` → Safari on iPhone (Naver serves its lighter mobile SERP to it)
/// - `Minimal` → Basic Mozilla (no platform-specific headers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchProfile {
    /// Minimal (User-Agent and language only)
    Minimal,

    /// Chrome on Windows
    Desktop,

    /// Safari on iPhone
    Mobile,
}

impl Default for FetchProfile {
    fn default() -> Self {
        Self::Desktop
    }
}

impl FetchProfile {
    /// Fetch Profile Name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Desktop => "Windows (Chrome)",
            Self::Mobile => "iOS (Safari)",
        }
    }

    /// All profiles, in the order adaptive fetching falls back through them.
    pub fn all() -> [FetchProfile; 3] {
        [Self::Desktop, Self::Mobile, Self::Minimal]
    }
}

/// Presets for fetching HTML.
///
/// [`FetchResult::profile_used`] tells you which profile eventually worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStrategy {
    /// One attempt with the requested profile.
    Fast,

    /// Requested profile first, then the remaining ones with brief delays in between.
    Adaptive,
}

impl Default for FetchStrategy {
    fn default() -> Self {
        Self::Adaptive
    }
}

/// Result of a fetch operation including telemetry metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    /// The fetched HTML content
    pub html: String,
    /// The profile that succeeded
    pub profile_used: FetchProfile,
    /// Total duration in milliseconds
    pub duration_ms: u64,
    /// Number of attempts before success
    pub attempts: usize,
}

impl FetchResult {
    pub fn into_html(self) -> String {
        self.html
    }
}
