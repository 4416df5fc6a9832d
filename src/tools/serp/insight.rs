use super::types::{Priority, SectionType};

/// Title keywords that pin down a residual `info`/`unknown` section, checked in order.
const TITLE_KEYWORDS: &[(&[&str], SectionType)] = &[
    (&["어학사전", "사전"], SectionType::Dictionary),
    (&["웹문서", "웹 검색 결과", "검색 결과"], SectionType::Web),
    (
        &["뉴스", "언론사", "연합뉴스", "뉴스1", "뉴시스"],
        SectionType::News,
    ),
    (&["블로그"], SectionType::Blog),
    (&["카페"], SectionType::Cafe),
    (&["지식in", "지식인"], SectionType::Kin),
    (&["이미지", "사진"], SectionType::Image),
    (&["동영상", "영상", "youtube", "유튜브"], SectionType::Video),
    (&["쇼핑", "가격비교"], SectionType::Shopping),
    (
        &["함께 많이 찾는", "연관 검색어", "함께보면 좋은"],
        SectionType::Related,
    ),
    (&["도구", "툴"], SectionType::Tool),
    (&["기본정보"], SectionType::Info),
];

/// Re-derive an `info`/`unknown` type from keywords in the section title.
///
/// Every other type is already meaningful and passes through unchanged, as
/// does an `info`/`unknown` type whose title matches nothing.
pub fn normalize_type(section_type: SectionType, title: &str) -> SectionType {
    if !matches!(section_type, SectionType::Info | SectionType::Unknown) {
        return section_type;
    }

    let title = title.trim().to_lowercase();
    if title.is_empty() {
        return section_type;
    }

    TITLE_KEYWORDS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| title.contains(needle)))
        .map(|(_, mapped)| *mapped)
        .unwrap_or(section_type)
}

/// Canned SEO remark for a section type at a given priority.
pub fn seo_insight(section_type: SectionType, priority: Priority) -> &'static str {
    use Priority::*;
    use SectionType::*;

    match (section_type, priority) {
        (Powerlink, High) => "광고가 1순위로 노출되어 경쟁이 치열합니다.",
        (Powerlink, Medium) => "광고 섹션이 상위에 노출되어 있습니다.",
        (Powerlink, Low) => "광고 섹션이 노출되어 있습니다.",
        (News, High) => "뉴스 섹션이 상위에 노출되어 신뢰도가 높습니다.",
        (News, Medium) => "뉴스 섹션이 노출되어 있습니다.",
        (News, Low) => "뉴스 섹션이 하위에 있습니다.",
        (Blog, High) => "블로그 섹션이 상위에 노출되어 콘텐츠 마케팅이 효과적입니다.",
        (Blog, Medium) => "블로그 섹션이 노출되어 있습니다.",
        (Blog, Low) => "블로그 섹션이 하위에 있습니다.",
        _ => "해당 섹션이 노출되어 있습니다.",
    }
}
