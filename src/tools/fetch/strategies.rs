use super::client::build_client_for_profile;
use super::headers::headers_for_profile;
use super::types::*;
use super::utils::*;
use crate::error::{KwError, Result};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderValue, REFERER};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

static CLIENT_CACHE: Lazy<Arc<DashMap<FetchProfile, Client>>> =
    Lazy::new(|| Arc::new(DashMap::new()));

/// Fast: one attempt with the requested profile.
pub(super) async fn fetch_fast(
    url: &str,
    profile: FetchProfile,
    referer: Option<&str>,
) -> Result<FetchResult> {
    let client = get_or_build_client(profile)?;
    let start = Instant::now();

    let html = fetch_with_client(&client, url, profile, referer).await?;
    Ok(FetchResult {
        html,
        profile_used: profile,
        duration_ms: start.elapsed().as_millis() as u64,
        attempts: 1,
    })
}

/// Adaptive: requested profile, then the remaining ones.
pub(super) async fn fetch_adaptive(
    url: &str,
    profile: FetchProfile,
    referer: Option<&str>,
) -> Result<FetchResult> {
    let start = Instant::now();
    let order = adaptive_order(profile);
    let mut all_errors = Vec::new();

    for (idx, profile) in order.iter().enumerate() {
        let client = get_or_build_client(*profile)?;

        match fetch_with_client(&client, url, *profile, referer).await {
            Ok(html) => {
                return Ok(FetchResult {
                    html,
                    profile_used: *profile,
                    duration_ms: start.elapsed().as_millis() as u64,
                    attempts: idx + 1,
                });
            }
            Err(e) => {
                tracing::warn!(url, profile = profile.name(), error = %e, "fetch attempt failed");
                all_errors.push(format!("{}: {}", profile.name(), e));

                if idx < order.len() - 1 {
                    tokio::time::sleep(Duration::from_millis(150 + jitter_ms(150))).await;
                }
            }
        }
    }

    Err(KwError::Http(format!(
        "all {} profiles failed for {url}: [{}]",
        order.len(),
        all_errors.join("; ")
    )))
}

/// Requested profile first, then every other profile in default order.
pub(super) fn adaptive_order(first: FetchProfile) -> Vec<FetchProfile> {
    let mut order = vec![first];
    order.extend(FetchProfile::all().into_iter().filter(|p| *p != first));
    order
}

async fn fetch_with_client(
    client: &Client,
    url: &str,
    profile: FetchProfile,
    referer: Option<&str>,
) -> Result<String> {
    let mut headers = headers_for_profile(profile);

    if let Some(ref_url) = referer {
        if let Ok(ref_value) = HeaderValue::from_str(ref_url) {
            headers.insert(REFERER, ref_value);
        }
    }

    tracing::debug!(url, profile = profile.name(), "GET");
    let response = client.get(url).headers(headers).send().await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(KwError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    validate_response(status, &body).map_err(|reason| KwError::Http(format!("{url}: {reason}")))?;

    Ok(body)
}

/// Get or build the cached client for a profile.
fn get_or_build_client(profile: FetchProfile) -> Result<Client> {
    if let Some(client_ref) = CLIENT_CACHE.get(&profile) {
        return Ok(client_ref.clone());
    }

    let client = build_client_for_profile(profile)?;
    CLIENT_CACHE.insert(profile, client.clone());
    Ok(client)
}
