use super::types::FetchProfile;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

const ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Build complete header map for the given profile, including User-Agent.
pub(crate) fn headers_for_profile(profile: FetchProfile) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (k, v) in header_pairs_for_profile(profile) {
        let Ok(name) = HeaderName::from_lowercase(k.to_ascii_lowercase().as_bytes()) else {
            continue;
        };
        if let Ok(val) = HeaderValue::from_str(v) {
            headers.insert(name, val);
        }
    }

    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(user_agent_for_profile(profile)),
    );

    headers
}

fn user_agent_for_profile(profile: FetchProfile) -> &'static str {
    match profile {
        FetchProfile::Minimal => "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
        FetchProfile::Desktop => {
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
        }
        FetchProfile::Mobile => {
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1"
        }
    }
}

/// Header pairs for the given profile (without User-Agent).
fn header_pairs_for_profile(profile: FetchProfile) -> Vec<(&'static str, &'static str)> {
    match profile {
        FetchProfile::Minimal => vec![("Accept-Language", ACCEPT_LANGUAGE)],
        FetchProfile::Desktop => vec![
            ("Accept", ACCEPT_HTML),
            ("Accept-Language", ACCEPT_LANGUAGE),
            ("Cache-Control", "max-age=0"),
            ("Upgrade-Insecure-Requests", "1"),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
            ("Sec-Fetch-User", "?1"),
            (
                "Sec-Ch-Ua",
                "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
            ),
            ("Sec-Ch-Ua-Mobile", "?0"),
            ("Sec-Ch-Ua-Platform", "\"Windows\""),
        ],
        // Safari does not send client hints
        FetchProfile::Mobile => vec![
            ("Accept", ACCEPT_HTML),
            ("Accept-Language", ACCEPT_LANGUAGE),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
        ],
    }
}
