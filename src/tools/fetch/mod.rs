mod client;
mod headers;
mod strategies;
mod utils;

pub mod types;

pub use types::*;

pub(crate) use client::build_api_client;

use crate::error::Result;

/// Fetch HTML from URL with a profile and strategy.
///
/// Returns `FetchResult` with HTML and metadata (profile used, duration, attempts).
///
/// - `FetchStrategy::Fast`: single attempt with `profile`
/// - `FetchStrategy::Adaptive`: `profile` first, then the remaining profiles
///
/// # Examples
/// ```no_run
/// use kwlens::tools::fetch::{fetch_page, FetchProfile, FetchStrategy};
///
/// # async fn example() -> kwlens::Result<()> {
/// let result = fetch_page(
///     "https://m.search.naver.com/search.naver?query=rust",
///     FetchProfile::Mobile,
///     FetchStrategy::Fast,
/// )
/// .await?;
/// println!("{} bytes in {}ms", result.html.len(), result.duration_ms);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page(
    url: &str,
    profile: FetchProfile,
    strategy: FetchStrategy,
) -> Result<FetchResult> {
    fetch_page_with_referer(url, profile, strategy, None).await
}

/// Like [`fetch_page`], sending a `Referer` header when one is given.
pub async fn fetch_page_with_referer(
    url: &str,
    profile: FetchProfile,
    strategy: FetchStrategy,
    referer: Option<&str>,
) -> Result<FetchResult> {
    match strategy {
        FetchStrategy::Fast => strategies::fetch_fast(url, profile, referer).await,
        FetchStrategy::Adaptive => strategies::fetch_adaptive(url, profile, referer).await,
    }
}
