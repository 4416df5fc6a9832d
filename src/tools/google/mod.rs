//! Google: Custom Search API, SERP result counts, WebScrapingAPI.

mod cse;
mod scrape;
mod wsa;

pub mod types;

pub use cse::{analyze_cse, CseClient};
pub use scrape::{extract_result_count, google_search_url, GoogleSerpCounter};
pub use types::*;
pub use wsa::{analyze_wsa, WsaClient};
