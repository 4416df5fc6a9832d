#![cfg(test)]
mod tests {
    use crate::tools::clean::utils::{normalize_unicode, remove_control_chars};
    use crate::tools::clean::*;

    #[test]
    fn test_strip_tags_drops_scripts_and_styles() {
        let html = "<p>본문</p><script>var x = '<b>no</b>';</script><style>p{}</style>끝";
        assert_eq!(normalize_whitespace(&strip_tags(html)), "본문 끝");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("&amp;"), "&");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("&quot;캠핑&quot;"), "\"캠핑\"");
        assert_eq!(decode_entities("&#39;"), "'");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("hello   world"), "hello world");
        assert_eq!(normalize_whitespace("  trim  me  "), "trim me");
        assert_eq!(normalize_whitespace("multi\n\n\nline"), "multi line");
    }

    #[test]
    fn test_clean_snippet_naver_title() {
        assert_eq!(
            clean_snippet("2024 <b>캠핑</b> 장비 추천 &amp; 후기"),
            "2024 캠핑 장비 추천 & 후기"
        );
    }

    #[test]
    fn test_clean_snippet_removes_invisible_chars() {
        assert_eq!(clean_snippet("캠\u{200B}핑\u{0000} 장비"), "캠핑 장비");
    }

    #[test]
    fn test_normalize_unicode_composes_hangul() {
        // 한 as conjoining jamo (NFD)
        let decomposed = "\u{1112}\u{1161}\u{11AB}";
        assert_eq!(normalize_unicode(decomposed), "한");
        assert_eq!(clean_snippet(decomposed), "한");
    }

    #[test]
    fn test_remove_control_chars_keeps_newlines() {
        assert_eq!(remove_control_chars("a\nb\tc\x07"), "a\nb\tc");
    }

    #[test]
    fn test_html_to_text_keeps_paragraphs() {
        let html = "<div><p>첫 문단입니다.</p><p>둘째   문단</p><br>셋째</div>";
        assert_eq!(html_to_text(html), "첫 문단입니다.\n둘째 문단\n셋째");
    }
}
