#[cfg(test)]
mod tests {
    use crate::config::NaverCredentials;
    use crate::error::KwError;
    use crate::tools::naver::utils::{canonical_blog_url, normalize_blog_link, post_frame_url};
    use crate::tools::naver::*;
    use crate::tools::types::BlogItem;
    use httpmock::prelude::*;
    use scraper::Html;

    const BLOG_SEARCH: &str = r#"{
        "lastBuildDate": "Mon, 19 Oct 2026 10:00:00 +0900",
        "total": 48213,
        "start": 1,
        "display": 2,
        "items": [
            {"title": "<b>camping</b> chair review", "link": "https://blog.naver.com/a/1",
             "description": "my <b>camping</b> chair &amp; table", "bloggername": "A", "postdate": "20261001"},
            {"title": "winter camping", "link": "https://blog.naver.com/b/2", "description": "cold nights"}
        ]
    }"#;

    fn client(server: &MockServer) -> NaverClient {
        NaverClient::new(NaverCredentials::new("id-123", "secret-456"))
            .unwrap()
            .with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn search_sends_key_pair_and_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/search/blog.json")
                .query_param("query", "camping")
                .query_param("display", "10")
                .query_param("start", "1")
                .query_param("sort", "sim")
                .header("x-naver-client-id", "id-123")
                .header("x-naver-client-secret", "secret-456");
            then.status(200)
                .header("content-type", "application/json")
                .body(BLOG_SEARCH);
        });

        let response = client(&server).search_blogs("camping", 10).await.unwrap();

        mock.assert();
        assert_eq!(response.total, Some(48213));
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].extra["bloggername"], "A");

        let item = BlogItem::from(&response.items[0]);
        assert_eq!(item.title, "camping chair review");
        assert_eq!(item.description, "my camping chair & table");
    }

    #[tokio::test]
    async fn display_is_clamped() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/v1/search/news.json")
                .query_param("display", "100")
                .query_param("start", "1000")
                .query_param("sort", "date");
            then.status(200).body(r#"{"total": 3, "items": []}"#);
        });

        client(&server)
            .search(Vertical::News, "camping", 500, 5000, Sort::Date)
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn search_count_formats_total() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/v1/search/webkr.json")
                .query_param("display", "1");
            then.status(200).body(r#"{"total": 1234567, "items": []}"#);
        });

        let count = client(&server)
            .search_count("camping", Vertical::Web)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(count.total, 1_234_567);
        assert_eq!(count.formatted, "1,234,567");
    }

    #[tokio::test]
    async fn search_count_without_total_is_a_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/v1/search/webkr.json");
            then.status(200).body(r#"{"items": []}"#);
        });

        let err = client(&server)
            .search_count("camping", Vertical::Web)
            .await
            .unwrap_err();
        assert!(matches!(err, KwError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/v1/search/webkr.json");
            then.status(200).body(r#"{"total": 1}"#);
        });

        let client = NaverClient::new(NaverCredentials::new("id-123", "  "))
            .unwrap()
            .with_base_url(server.base_url());
        let err = client
            .search_count("camping", Vertical::Web)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            KwError::MissingCredentials("QUANTITY_NAVER_CLIENT_SECRET")
        ));
        mock.assert_hits(0);
        assert!(client.status().client_id_set);
        assert!(!client.status().client_secret_set);
    }

    #[tokio::test]
    async fn api_errors_carry_naver_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/v1/search/blog.json");
            then.status(401)
                .body(r#"{"errorMessage": "Authentication failed", "errorCode": "024"}"#);
        });

        let err = client(&server)
            .search_blogs("camping", 5)
            .await
            .unwrap_err();
        match err {
            KwError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Authentication failed (024)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let server = MockServer::start();
        let err = client(&server).search_blogs("  ", 5).await.unwrap_err();
        assert!(matches!(err, KwError::InvalidInput(_)));
    }

    #[test]
    fn vertical_names_round_trip() {
        assert_eq!(Vertical::Cafe.as_str(), "cafearticle");
        assert_eq!("web".parse::<Vertical>().unwrap(), Vertical::Web);
        assert_eq!("encyc".parse::<Vertical>().unwrap(), Vertical::Encyclopedia);
        assert!("maps".parse::<Vertical>().is_err());
    }

    #[test]
    fn document_count_patterns() {
        assert_eq!(
            extract_document_count("<span class=\"title_num\">1-10 / 약 12,345개</span>"),
            Some(12_345)
        );
        assert_eq!(extract_document_count("<p>678개의 결과</p>"), Some(678));
        assert_eq!(extract_document_count("<p>총 9,001개</p>"), Some(9_001));
        assert_eq!(extract_document_count("<p>결과 없음</p>"), None);
    }

    const BLOG_SERP: &str = r#"<!DOCTYPE html><html><body>
      <ul class="lst_total">
        <li><a class="thumb_link" href="https://blog.naver.com/alpha/111"><img src="t.jpg"></a>
            <a class="api_txt_lines total_tit" href="https://blog.naver.com/alpha/111">Best <mark>camping</mark> chairs</a></li>
        <li><a class="api_txt_lines total_tit" href="http://m.blog.naver.com/beta/222">Winter camping notes</a></li>
        <li><a href="https://cafe.naver.com/gamma/333">Cafe post</a></li>
        <li><div data-url="https://blog.naver.com/delta/444"></div></li>
      </ul></body></html>"#;

    #[test]
    fn blog_serp_items_in_order() {
        let items = parse_blog_serp(BLOG_SERP, 10);
        let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();

        assert_eq!(
            links,
            vec![
                "https://blog.naver.com/alpha/111",
                "https://m.blog.naver.com/beta/222",
                "https://blog.naver.com/delta/444",
            ]
        );
        assert_eq!(items[0].title, "Best camping chairs");
        assert_eq!(items[2].title, "https://blog.naver.com/delta/444");
        assert!(items.iter().all(|i| i.description.is_empty()));
    }

    #[test]
    fn blog_serp_respects_limit() {
        assert_eq!(parse_blog_serp(BLOG_SERP, 1).len(), 1);
        assert!(parse_blog_serp("<html><body>nothing</body></html>", 5).is_empty());
    }

    #[test]
    fn blog_links_are_normalized() {
        assert_eq!(
            normalize_blog_link(" http:\\/\\/blog.naver.com\\/x\\/1 "),
            "https://blog.naver.com/x/1"
        );
    }

    #[test]
    fn meta_description_prefers_open_graph() {
        let html = r#"<html><head>
            <meta name="description" content="plain">
            <meta property="og:description" content="open graph &amp; more">
        </head></html>"#;
        assert_eq!(
            extract_meta_description(html).as_deref(),
            Some("open graph & more")
        );

        let plain = r#"<html><head><meta name="description" content="plain"></head></html>"#;
        assert_eq!(extract_meta_description(plain).as_deref(), Some("plain"));
        assert_eq!(extract_meta_description("<html></html>"), None);
    }

    #[test]
    fn canonical_only_counts_on_blog_host() {
        let doc = Html::parse_document(
            r#"<html><head><link rel="canonical" href="https://blog.naver.com/a/1"></head></html>"#,
        );
        assert_eq!(
            canonical_blog_url(&doc).as_deref(),
            Some("https://blog.naver.com/a/1")
        );

        let og = Html::parse_document(
            r#"<html><head><meta property="og:url" content="https://m.blog.naver.com/a/1"></head></html>"#,
        );
        assert_eq!(
            canonical_blog_url(&og).as_deref(),
            Some("https://m.blog.naver.com/a/1")
        );

        let other = Html::parse_document(
            r#"<html><head><link rel="canonical" href="https://example.com/a"></head></html>"#,
        );
        assert_eq!(canonical_blog_url(&other), None);
    }

    #[test]
    fn post_frame_prefers_postview() {
        let doc = Html::parse_document(
            r#"<html><body>
                <iframe src="https://ads.example.com/frame"></iframe>
                <iframe id="mainFrame" src="/PostView.naver?blogId=alpha&amp;logNo=111"></iframe>
            </body></html>"#,
        );
        assert_eq!(
            post_frame_url(&doc, "https://blog.naver.com/alpha/111").as_deref(),
            Some("https://blog.naver.com/PostView.naver?blogId=alpha&logNo=111")
        );

        let none = Html::parse_document(
            r#"<html><body><iframe src="https://ads.example.com/f"></iframe></body></html>"#,
        );
        assert_eq!(
            post_frame_url(&none, "https://blog.naver.com/alpha/111"),
            None
        );
    }

    #[tokio::test]
    async fn serp_counter_reads_total() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search.naver")
                .query_param("where", "web")
                .query_param("query", "camping");
            then.status(200)
                .body("<!DOCTYPE html><html><body><span>약 3,210개</span></body></html>");
        });

        let counter = NaverSerpCounter::new().with_base_url(server.url("/search.naver"));
        assert_eq!(counter.count("camping").await.unwrap(), 3_210);
        mock.assert();
    }

    #[tokio::test]
    async fn serp_counter_defaults_to_zero() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/search.naver");
            then.status(200)
                .body("<html><body>no total here</body></html>");
        });

        let counter = NaverSerpCounter::new().with_base_url(server.url("/search.naver"));
        assert_eq!(counter.count("camping").await.unwrap(), 0);
    }

    #[test]
    fn serp_counter_url() {
        assert_eq!(
            NaverSerpCounter::new().count_url("캠핑"),
            "https://search.naver.com/search.naver?where=web&sm=tab_hty.top&ie=utf8&query=%EC%BA%A0%ED%95%91"
        );
    }

    #[tokio::test]
    async fn blog_scraper_falls_back_to_desktop() {
        let server = MockServer::start();
        let mobile = server.mock(|when, then| {
            when.path("/m/search.naver").query_param("where", "m_blog");
            then.status(503).body("<html>busy</html>");
        });
        let desktop = server.mock(|when, then| {
            when.path("/search.naver")
                .query_param("where", "post")
                .header("referer", "https://search.naver.com/");
            then.status(200).body(BLOG_SERP);
        });

        let scraper = BlogScraper::new()
            .with_endpoints(server.url("/m/search.naver"), server.url("/search.naver"))
            .without_descriptions();
        let items = scraper.fetch_top_blogs("camping", 2).await.unwrap();

        mobile.assert();
        desktop.assert();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "Winter camping notes");
    }

    #[tokio::test]
    async fn blog_scraper_reports_empty_serp() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/m/search.naver");
            then.status(200)
                .body("<html><body>검색결과가 없습니다</body></html>");
        });

        let scraper = BlogScraper::new()
            .with_endpoints(server.url("/m/search.naver"), server.url("/search.naver"))
            .without_descriptions();
        let err = scraper.fetch_top_blogs("camping", 5).await.unwrap_err();
        assert!(matches!(err, KwError::NotFound(_)));
    }

    #[tokio::test]
    async fn post_content_follows_postview_frame() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/alpha/111");
            then.status(200).body(
                r#"<html><body><iframe id="mainFrame" src="/PostView.naver?blogId=alpha&amp;logNo=111"></iframe></body></html>"#,
            );
        });
        let frame = server.mock(|when, then| {
            when.path("/PostView.naver").query_param("logNo", "111");
            then.status(200).body(
                r#"<html><body><div class="se-main-container"><img src="a.jpg"> body</div></body></html>"#,
            );
        });

        let content = fetch_post_content(&server.url("/alpha/111")).await.unwrap();

        frame.assert();
        assert!(content.contains("<img src=\"a.jpg\">"));
    }

    #[tokio::test]
    async fn post_content_extracts_body_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/beta/222");
            then.status(200).body(
                r#"<html><body><div class="se-main-container"><p>캠핑 의자 &amp; 테이블</p><script>var x = 1;</script><p>후기</p></div></body></html>"#,
            );
        });

        let content = fetch_post_content(&server.url("/beta/222")).await.unwrap();
        assert_eq!(content, "캠핑 의자 & 테이블 후기");
    }

    #[tokio::test]
    async fn post_content_falls_back_to_page() {
        let server = MockServer::start();
        let page = "<html><body><p>plain page</p></body></html>";
        server.mock(|when, then| {
            when.path("/gamma/333");
            then.status(200).body(page);
        });

        let content = fetch_post_content(&server.url("/gamma/333")).await.unwrap();
        assert_eq!(content, page);
    }
}
