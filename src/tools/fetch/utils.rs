use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SUSPICIOUS_PATTERNS: [&str; 10] = [
    "verify you are a human",
    "please complete the captcha",
    "solve this captcha",
    "captcha challenge",
    "cf-browser-verification",
    "cf-captcha-container",
    "blocked by cloudflare",
    "unusual traffic from your computer",
    "자동입력 방지",
    "bot detection",
];

/// Random-ish jitter in milliseconds within [0, range).
pub(super) fn jitter_ms(range: u64) -> u64 {
    if range == 0 {
        return 0;
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_nanos(0));
    let nanos = now.subsec_nanos() as u64;
    let micros = (now.as_micros() & 0xFFFF) as u64;
    (nanos ^ (micros << 5)) % range
}

/// Validate an HTTP response for scrapable HTML.
///
/// Returns Ok(()) if valid, Err(reason) if invalid. Rejects non-success
/// statuses, empty bodies, bodies without HTML markers and bot challenges.
pub(super) fn validate_response(
    status_code: reqwest::StatusCode,
    body: &str,
) -> Result<(), String> {
    if !status_code.is_success() {
        let label = match status_code {
            reqwest::StatusCode::TOO_MANY_REQUESTS => "rate limited",
            reqwest::StatusCode::FORBIDDEN => "forbidden",
            reqwest::StatusCode::NOT_FOUND => "not found",
            reqwest::StatusCode::UNAUTHORIZED => "unauthorized",
            s if s.is_server_error() => "server error",
            _ => "unexpected status",
        };
        return Err(format!("status {} ({label})", status_code.as_u16()));
    }

    if body.trim().is_empty() {
        return Err("invalid - empty body".to_string());
    }

    let lower = body.to_lowercase();
    if !lower.contains("<html") && !lower.contains("<!doctype") {
        return Err("invalid - missing HTML markers".to_string());
    }

    if let Some(pattern) = SUSPICIOUS_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(format!("suspicious - {pattern}"));
    }

    Ok(())
}
