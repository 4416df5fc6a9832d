#[cfg(test)]
mod tests {
    use crate::config::AdsCredentials;
    use crate::error::KwError;
    use crate::tools::ads::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn credentials() -> AdsCredentials {
        AdsCredentials {
            developer_token: Some("dev-token".into()),
            client_id: Some("client.apps".into()),
            client_secret: Some("shh".into()),
            refresh_token: Some("refresh-1".into()),
            customer_id: Some("123-456-7890".into()),
            login_customer_id: Some("999-000-1111".into()),
        }
    }

    fn client(server: &MockServer) -> AdsClient {
        AdsClient::new(credentials())
            .unwrap()
            .with_endpoints(server.url("/token"), server.base_url())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn competition_buckets() {
        assert_eq!(Competition::from_index(0), Competition::Unknown);
        assert_eq!(Competition::from_index(1), Competition::Low);
        assert_eq!(Competition::from_index(33), Competition::Low);
        assert_eq!(Competition::from_index(34), Competition::Medium);
        assert_eq!(Competition::from_index(66), Competition::Medium);
        assert_eq!(Competition::from_index(67), Competition::High);
        assert_eq!(
            serde_json::to_value(Competition::Medium).unwrap(),
            json!("MEDIUM")
        );
    }

    #[test]
    fn keyword_seed_request_body() {
        let keywords = vec!["캠핑 의자".to_string(), "  ".to_string()];
        let request = build_idea_request(&keywords, None, &[2410], 1012, day()).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "language": "languageConstants/1012",
                "geoTargetConstants": ["geoTargetConstants/2410"],
                "keywordPlanNetwork": "GOOGLE_SEARCH",
                "includeAdultKeywords": false,
                "historicalMetricsOptions": {
                    "yearMonthRange": {
                        "start": {"year": 2025, "month": 10},
                        "end": {"year": 2026, "month": 10}
                    }
                },
                "keywordSeed": {"keywords": ["캠핑 의자"]}
            })
        );
    }

    #[test]
    fn url_and_combined_seeds() {
        let shop = Some("https://shop.example.com");
        let url_only = build_idea_request(&[], shop, &[], 1012, day()).unwrap();
        assert_eq!(url_only.url_seed.unwrap().url, "https://shop.example.com");
        assert!(url_only.keyword_seed.is_none());

        let tent = ["tent".to_string()];
        let both = build_idea_request(&tent, shop, &[2410, 2840], 1000, day()).unwrap();
        let seed = both.keyword_and_url_seed.unwrap();
        assert_eq!(seed.keywords, vec!["tent".to_string()]);
        assert_eq!(both.geo_target_constants.len(), 2);
        assert!(both.keyword_seed.is_none() && both.url_seed.is_none());
    }

    #[test]
    fn seeds_are_required() {
        let blank = ["".to_string()];
        let err = build_idea_request(&blank, Some(" "), &[2410], 1012, day()).unwrap_err();
        assert!(matches!(err, KwError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn refresh_failure_is_auth_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(400).body(r#"{"error": "invalid_grant"}"#);
        });

        let err = client(&server).access_token().await.unwrap_err();
        assert!(matches!(err, KwError::Auth(ref msg) if msg.contains("invalid_grant")));
    }

    #[tokio::test]
    async fn missing_refresh_token_is_reported() {
        let mut creds = credentials();
        creds.refresh_token = None;
        let err = AdsClient::new(creds)
            .unwrap()
            .access_token()
            .await
            .unwrap_err();
        assert!(matches!(err, KwError::MissingCredentials("GOOGLE_ADS_REFRESH_TOKEN")));
    }

    #[tokio::test]
    async fn generates_ideas_with_string_metrics() {
        let server = MockServer::start();
        let token = server.mock(|when, then| {
            when.method(POST)
                .path("/token")
                .body_contains("grant_type=refresh_token")
                .body_contains("refresh_token=refresh-1");
            then.status(200)
                .body(r#"{"access_token": "ya29.token", "expires_in": 3599}"#);
        });
        let ideas = server.mock(|when, then| {
            when.method(POST)
                .path("/v21/customers/1234567890:generateKeywordIdeas")
                .header("authorization", "Bearer ya29.token")
                .header("developer-token", "dev-token")
                .header("login-customer-id", "9990001111")
                .body_contains("\"keywordSeed\"");
            then.status(200).body(
                r#"{"results": [
                    {"text": "camping chair", "keywordIdeaMetrics": {
                        "avgMonthlySearches": "8100", "competition": "HIGH",
                        "competitionIndex": "87", "lowTopOfPageBidMicros": "420000",
                        "highTopOfPageBidMicros": 1850000, "averageCpcMicros": "910000"}},
                    {"text": "camping chair rental"}
                ]}"#,
            );
        });

        let result = client(&server)
            .generate_keyword_ideas(&["camping chair".to_string()], None, &[2410], 1012)
            .await
            .unwrap();

        token.assert();
        ideas.assert();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].keyword, "camping chair");
        assert_eq!(result[0].avg_monthly_searches, 8100);
        assert_eq!(result[0].competition, Competition::High);
        assert_eq!(result[0].competition_index, 87);
        assert_eq!(result[0].high_top_of_page_bid_micros, 1_850_000);
        assert_eq!(result[0].cpc_bid_micros, 910_000);
        assert_eq!(result[1].competition, Competition::Unknown);
        assert_eq!(result[1].avg_monthly_searches, 0);
    }

    #[tokio::test]
    async fn empty_planner_response_means_no_ideas() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/token");
            then.status(200).body(r#"{"access_token": "t"}"#);
        });
        server.mock(|when, then| {
            when.path("/v21/customers/1234567890:generateKeywordIdeas");
            then.status(200).body("{}");
        });

        let result = client(&server)
            .generate_keyword_ideas(&[], Some("https://shop.example.com"), &[2410], 1012)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn planner_errors_carry_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/token");
            then.status(200).body(r#"{"access_token": "t"}"#);
        });
        server.mock(|when, then| {
            when.path("/v21/customers/1234567890:generateKeywordIdeas");
            then.status(403).body(
                r#"{"error": {"code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED"}}"#,
            );
        });

        let err = client(&server)
            .generate_keyword_ideas(&["tent".to_string()], None, &[2410], 1012)
            .await
            .unwrap_err();
        match err {
            KwError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "The caller does not have permission");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
