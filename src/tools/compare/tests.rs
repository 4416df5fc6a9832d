#[cfg(test)]
mod tests {
    use crate::config::CseCredentials;
    use crate::error::{KwError, Result};
    use crate::tools::compare::*;
    use crate::tools::google::CseClient;
    use crate::tools::naver::NaverSerpCounter;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedCounter {
        name: &'static str,
        count: Option<u64>,
        calls: AtomicUsize,
    }

    impl FixedCounter {
        fn new(name: &'static str, count: Option<u64>) -> Self {
            Self {
                name,
                count,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentCounter for FixedCounter {
        fn name(&self) -> &str {
            self.name
        }

        async fn document_count(&self, _keyword: &str) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.count
                .ok_or_else(|| KwError::NotFound("no total".to_string()))
        }
    }

    #[tokio::test]
    async fn test_both_engines_compared() {
        let naver = FixedCounter::new("네이버", Some(1_500_000));
        let google = FixedCounter::new("구글", Some(600_000));

        let report = compare_documents("캠핑", Engine::Both, &naver, &google).await;

        assert_eq!(report.engines.len(), 2);
        assert_eq!(report.engines[0].name, "네이버");
        assert_eq!(report.total_documents, 2_100_000);
        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.difference, 900_000);
        assert_eq!(comparison.higher_engine, "네이버");
        assert_eq!(comparison.ratio, 2.5);
    }

    #[tokio::test]
    async fn test_single_engine_has_no_comparison() {
        let naver = FixedCounter::new("네이버", Some(10));
        let google = FixedCounter::new("구글", Some(20));

        let report = compare_documents("캠핑", Engine::Google, &naver, &google).await;

        assert_eq!(naver.calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.engines.len(), 1);
        assert_eq!(report.engines[0].name, "구글");
        assert!(report.comparison.is_none());
        assert_eq!(report.total_documents, 20);
    }

    #[tokio::test]
    async fn test_failed_engine_counts_zero() {
        let naver = FixedCounter::new("네이버", None);
        let google = FixedCounter::new("구글", Some(300));

        let report = compare_documents("캠핑", Engine::Both, &naver, &google).await;

        assert_eq!(report.engines[0].document_count, 0);
        assert!(report.engines[0].error.as_deref().unwrap().contains("no total"));
        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.ratio, 0.0);
        assert_eq!(comparison.higher_engine, "구글");
        assert_eq!(comparison.difference, 300);
    }

    #[test]
    fn test_engine_parsing() {
        assert_eq!("NAVER".parse::<Engine>().unwrap(), Engine::Naver);
        assert_eq!("all".parse::<Engine>().unwrap(), Engine::Both);
        assert!("bing".parse::<Engine>().is_err());
        assert_eq!(
            serde_json::to_value(Engine::Google).unwrap(),
            serde_json::json!("google")
        );
    }

    #[tokio::test]
    async fn test_live_counters_against_mocks() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/search.naver").query_param("where", "web");
            then.status(200)
                .body(r#"<html><body><span class="title_num">약 12,345개</span></body></html>"#);
        });
        server.mock(|when, then| {
            when.path("/customsearch/v1").query_param("num", "1");
            then.status(200)
                .body(r#"{"searchInformation": {"totalResults": "4115"}, "items": []}"#);
        });

        let naver = NaverSerpCounter::new().with_base_url(server.url("/search.naver"));
        let google = CseClient::new(CseCredentials::new("key", "cx"))
            .unwrap()
            .with_endpoint(server.url("/customsearch/v1"));

        let report = compare_documents("캠핑", Engine::Both, &naver, &google).await;

        assert_eq!(report.engines[0].error, None);
        assert_eq!(report.engines[0].document_count, 12_345);
        assert_eq!(report.engines[1].document_count, 4_115);
        assert_eq!(report.comparison.unwrap().ratio, 3.0);
    }
}
