//! Document-count comparison between Naver and Google.

mod tests;

pub mod types;

pub use types::*;

use async_trait::async_trait;
use std::time::Instant;

use crate::error::Result;
use crate::tools::google::CseClient;
use crate::tools::naver::NaverSerpCounter;

/// A search engine that can report how many documents match a keyword.
#[async_trait]
pub trait DocumentCounter: Send + Sync {
    fn name(&self) -> &str;
    async fn document_count(&self, keyword: &str) -> Result<u64>;
}

#[async_trait]
impl DocumentCounter for NaverSerpCounter {
    fn name(&self) -> &str {
        "네이버"
    }

    async fn document_count(&self, keyword: &str) -> Result<u64> {
        self.count(keyword).await
    }
}

#[async_trait]
impl DocumentCounter for CseClient {
    fn name(&self) -> &str {
        "구글"
    }

    async fn document_count(&self, keyword: &str) -> Result<u64> {
        CseClient::document_count(self, keyword).await
    }
}

async fn run_counter(counter: &dyn DocumentCounter, keyword: &str) -> EngineResult {
    let start = Instant::now();
    let outcome = counter.document_count(keyword).await;
    let search_time_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(document_count) => EngineResult {
            name: counter.name().to_string(),
            document_count,
            search_time_ms,
            error: None,
        },
        Err(e) => {
            tracing::warn!(engine = counter.name(), keyword, error = %e, "document count failed");
            EngineResult {
                name: counter.name().to_string(),
                document_count: 0,
                search_time_ms,
                error: Some(e.to_string()),
            }
        }
    }
}

fn compare(naver: &EngineResult, google: &EngineResult) -> Comparison {
    let (n, g) = (naver.document_count, google.document_count);
    let ratio = if n > 0 && g > 0 {
        (n as f64 / g as f64 * 100.0).round() / 100.0
    } else {
        0.0
    };
    Comparison {
        naver_count: n,
        google_count: g,
        difference: n.abs_diff(g),
        higher_engine: if n > g {
            naver.name.clone()
        } else {
            google.name.clone()
        },
        ratio,
    }
}

/// Count documents for `keyword` on the selected engines, one after the other.
pub async fn compare_documents(
    keyword: &str,
    engine: Engine,
    naver: &dyn DocumentCounter,
    google: &dyn DocumentCounter,
) -> DocumentReport {
    let mut engines = Vec::with_capacity(2);
    if engine.includes_naver() {
        engines.push(run_counter(naver, keyword).await);
    }
    if engine.includes_google() {
        engines.push(run_counter(google, keyword).await);
    }

    let comparison = match engines.as_slice() {
        [naver, google] => Some(compare(naver, google)),
        _ => None,
    };
    let total_documents = engines.iter().map(|e| e.document_count).sum();

    tracing::info!(keyword, engine = %engine, total_documents, "document counts compared");

    DocumentReport {
        keyword: keyword.to_string(),
        engine,
        engines,
        comparison,
        total_documents,
        analysis_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
