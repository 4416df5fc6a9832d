#[cfg(test)]
mod tests {
    use crate::tools::blog::utils::*;
    use crate::tools::blog::*;
    use crate::tools::types::BlogItem;
    use httpmock::prelude::*;

    fn item(title: &str, description: &str, link: &str) -> BlogItem {
        BlogItem {
            title: title.to_string(),
            link: link.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_classify_title() {
        assert_eq!(
            classify_title("캠핑 의자 추천 10가지"),
            TitlePattern::Numbered
        );
        assert_eq!(classify_title("2024년 캠핑"), TitlePattern::Concise);
        assert_eq!(
            classify_title("캠핑 의자 정말 좋아요!"),
            TitlePattern::Exclamatory
        );
        assert_eq!(
            classify_title("초보 캠퍼를 위한 감성 캠핑 장비 구매 가이드 총정리"),
            TitlePattern::Descriptive
        );
    }

    #[test]
    fn test_classify_title_extended() {
        assert_eq!(
            classify_title_extended("초보 캠퍼를 위한 감성 캠핑 장비 구매 가이드 총정리"),
            TitlePattern::Guide
        );
        assert_eq!(
            classify_title_extended("캠핑 의자 한 달 사용 후기"),
            TitlePattern::Review
        );
        assert_eq!(
            classify_title_extended("헬리녹스 VS 콜맨 의자"),
            TitlePattern::Comparison
        );
        assert_eq!(
            classify_title_extended("[내돈내산] 캠핑 테이블"),
            TitlePattern::Bracketed
        );
        assert_eq!(
            classify_title_extended("캠핑 테이블"),
            TitlePattern::Concise
        );
        // numbers glued to latin letters are not list markers
        assert_eq!(classify_title_extended("TOP5 캠핑"), TitlePattern::Concise);
    }

    #[test]
    fn test_infer_style() {
        assert_eq!(
            infer_style("Tip: 의자 고르는 법"),
            Some(TitlePattern::Guide)
        );
        assert_eq!(infer_style("캠핑 꿀팁 정리"), Some(TitlePattern::Guide));
        assert_eq!(
            infer_style("솔직 후기 남깁니다"),
            Some(TitlePattern::Review)
        );
        assert_eq!(
            infer_style("가격 대비 만족"),
            Some(TitlePattern::Comparison)
        );
        assert_eq!(infer_style("그냥 일기"), None);
    }

    #[test]
    fn test_title_pattern_labels() {
        assert_eq!(TitlePattern::Numbered.to_string(), "숫자형(리스트)");
        assert_eq!(
            serde_json::to_value(TitlePattern::Exclamatory).unwrap(),
            serde_json::json!("감탄/의문형")
        );
    }

    #[test]
    fn test_count_occurrences_ignores_case() {
        assert_eq!(count_occurrences("캠핑 CAMPING camping", "camping"), 2);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_keyword_positions() {
        assert_eq!(
            keyword_positions("캠핑 의자 후기", "캠핑"),
            vec!["본문 초반", "본문 하단", "제목/리드"]
        );

        let middle = format!("{}캠핑{}", "가".repeat(40), "나".repeat(150));
        assert_eq!(keyword_positions(&middle, "캠핑"), vec!["본문 초반"]);
        assert!(keyword_positions("의자 후기", "캠핑").is_empty());
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("첫 문장입니다. 두 번째!\n세 번째？ 끝"),
            vec!["첫 문장입니다.", "두 번째!", "세 번째？", "끝"]
        );
        assert_eq!(sentence_stats("가나다. 라마!"), (2, 3.5));
        assert_eq!(sentence_stats("   "), (0, 0.0));
    }

    #[test]
    fn test_densest_sentence() {
        let (sentence, density) = densest_sentence("캠핑은 좋다. 캠핑 캠핑!", "캠핑");
        assert_eq!(sentence, "캠핑 캠핑!");
        assert_eq!(density, 1333.33);
    }

    #[test]
    fn test_image_and_link_hints() {
        assert_eq!(
            count_images("사진 두 장과 https://cdn.example.com/b.png"),
            2
        );
        assert_eq!(
            count_links(r#"<a href="https://naver.com">링크</a> 그리고 http://example.com"#),
            3
        );
        assert_eq!(count_numbers("1박 2일 캠핑 300m"), 3);
    }

    #[test]
    fn test_tally_breaks_ties_by_first_appearance() {
        let mut tally = Tally::default();
        for key in ["a", "b", "b", "c", "a"] {
            tally.add(key);
        }
        assert_eq!(tally.top_keys(2), vec!["a", "b"]);
        assert_eq!(tally.top(5), vec![("a", 2), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_co_words_skip_stopwords_and_keyword() {
        let mut bag = Tally::default();
        accumulate_co_words("캠핑 의자, 캠핑 테이블! the 의자 a", &mut bag, "캠핑");
        let top = top_co_keywords(&bag, 10);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].keyword, "의자");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].keyword, "테이블");
    }

    #[test]
    fn test_analyze_snippets() {
        let items = vec![
            item(
                "캠핑 의자 추천 10가지",
                "캠핑 의자 꿀팁 정리",
                "https://blog.naver.com/a/1",
            ),
            item(
                "<b>캠핑</b> 테이블 후기",
                "솔직 후기 캠핑 테이블",
                "https://blog.naver.com/b/2",
            ),
            item(
                "감성 캠핑 장비 총정리 최고의 선택!",
                "장비 리스트",
                "https://blog.naver.com/c/3",
            ),
        ];

        let report = analyze_snippets("캠핑", &items);

        assert_eq!(report.summary.total_docs, 3);
        assert_eq!(report.summary.avg_chars, 25);
        assert_eq!(report.summary.avg_paragraphs, 2.0);
        assert_eq!(report.summary.avg_keyword_density_pct, 266.67);
        assert_eq!(
            report.summary.top_title_types,
            vec![
                TitlePattern::Numbered,
                TitlePattern::Concise,
                TitlePattern::Exclamatory,
            ]
        );

        assert_eq!(report.top_posts[0].keyword_count, 2);
        assert_eq!(report.top_posts[0].keyword_density_pct, 307.69);
        assert_eq!(report.top_posts[1].title, "캠핑 테이블 후기");
        assert_eq!(report.top_posts[1].keyword_density_pct, 347.83);
        assert_eq!(report.top_posts[2].keyword_density_pct, 142.86);

        assert_eq!(report.keyword_analysis.total_count, 5);
        assert_eq!(
            report.keyword_analysis.positions,
            vec!["본문 초반", "본문 하단", "제목/리드"]
        );
        assert_eq!(
            report.title_style.style_examples,
            vec![TitlePattern::Guide, TitlePattern::Review]
        );

        let words: Vec<&str> = report
            .co_keywords
            .iter()
            .map(|c| c.keyword.as_str())
            .collect();
        let expected = [
            "의자", "꿀팁", "정리", "솔직", "후기", "테이블", "장비", "리스트",
        ];
        assert_eq!(words, expected);
    }

    #[test]
    fn test_analyze_snippets_caps_and_empty() {
        let items: Vec<BlogItem> = (0..12)
            .map(|i| {
                let link = format!("https://blog.naver.com/x/{i}");
                item(&format!("캠핑 {i}"), "캠핑", &link)
            })
            .collect();
        assert_eq!(analyze_snippets("캠핑", &items).top_posts.len(), 10);

        let empty = analyze_snippets("캠핑", &[]);
        assert_eq!(empty.summary.total_docs, 0);
        assert_eq!(empty.summary.avg_chars, 0);
        assert_eq!(empty.summary.avg_keyword_density_pct, 0.0);
        assert!(empty.co_keywords.is_empty());
    }

    #[test]
    fn test_analyze_posts() {
        let html = concat!(
            r#"<div class="se-main-container"><p>캠핑 장비 3가지</p>"#,
            r#"<img src="https://blogfiles.pstatic.net/a.jpg">"#,
            r#"<a href="https://shop.example.com">구매</a></div>"#,
        );
        let docs = vec![
            PostDocument {
                item: item("의자 후기", "요약", "https://blog.naver.com/a/1"),
                body: Some("캠핑 의자를 샀다. 정말 편하다!".to_string()),
            },
            PostDocument::from(item(
                "캠핑 테이블 비교",
                "캠핑 테이블 두 종류",
                "https://blog.naver.com/b/2",
            )),
            PostDocument {
                item: item("장비 정리", "", "https://blog.naver.com/c/3"),
                body: Some(html.to_string()),
            },
        ];

        let report = analyze_posts("캠핑", &docs);

        let first = &report.top_posts[0];
        assert_eq!(first.first_occurrence, Some(11));
        assert_eq!(first.first_occurrence_section, "본문 초반");
        assert_eq!(first.content_preview, "캠핑 의자를 샀다. 정말 편하다!...");
        assert!(first.densest_sentence.ends_with("캠핑 의자를 샀다."));

        let second = &report.top_posts[1];
        assert_eq!(second.first_occurrence, Some(0));
        assert_eq!(second.first_occurrence_section, "제목/요약");
        assert_eq!(second.content_preview, "");
        assert_eq!(second.keyword_count, 2);

        let third = &report.top_posts[2];
        assert_eq!(third.image_count, 3);
        assert_eq!(third.link_count, 3);
        assert!(third.content_preview.starts_with("캠핑 장비 3가지"));

        assert_eq!(report.summary.total_docs, 3);
        assert_eq!(report.summary.avg_exclamations_per_post, 0.33);
        assert_eq!(report.summary.avg_images_per_post, 1.0);
        assert_eq!(report.summary.avg_links_per_post, 1.0);
        assert_eq!(
            report.title_summary.top_title_patterns,
            vec![
                TitlePattern::Review,
                TitlePattern::Comparison,
                TitlePattern::Concise,
            ]
        );
    }

    #[test]
    fn test_first_occurrence_missing() {
        let first = item("의자 후기", "요약", "https://blog.naver.com/a/1");
        let docs = vec![PostDocument::from(first)];
        let report = analyze_posts("캠핑", &docs);

        assert_eq!(report.top_posts[0].first_occurrence, None);
        assert_eq!(report.top_posts[0].first_occurrence_section, "-");
        assert_eq!(report.top_posts[0].densest_sentence_density_pct, 0.0);
    }

    #[tokio::test]
    async fn test_fetch_post_documents_keeps_order_and_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/alpha/1");
            then.status(200).body(
                r#"<html><body><div id="postViewArea"><p>캠핑 본문</p></div></body></html>"#,
            );
        });
        server.mock(|when, then| {
            when.path("/beta/2");
            then.status(404).body("<html><body>gone</body></html>");
        });

        let items = vec![
            item("첫 글", "", &server.url("/alpha/1")),
            item("둘째 글", "", &server.url("/beta/2")),
            item("셋째 글", "", &server.url("/gamma/3")),
        ];

        let docs = fetch_post_documents(items, 2).await;

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].item.title, "첫 글");
        assert_eq!(docs[0].body.as_deref(), Some("캠핑 본문"));
        assert_eq!(docs[1].item.title, "둘째 글");
        assert!(docs[1].body.is_none());
    }
}
