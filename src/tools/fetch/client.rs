use super::types::FetchProfile;
use crate::error::{KwError, Result};
use reqwest::{redirect, Client};
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;
const POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Build a reqwest client for scraping with the given profile.
pub(crate) fn build_client_for_profile(profile: FetchProfile) -> Result<Client> {
    let builder = Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST);

    // Minimal profile: no cookies
    let builder = match profile {
        FetchProfile::Minimal => builder.cookie_store(false),
        _ => builder,
    };

    builder
        .build()
        .map_err(|e| KwError::Http(format!("failed to build client: {e}")))
}

/// Build a plain JSON API client (no cookies, same timeout as scraping).
pub(crate) fn build_api_client() -> Result<Client> {
    Client::builder()
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
        .user_agent(concat!("kwlens/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| KwError::Http(format!("failed to build client: {e}")))
}
