//! The probe battery: which `div`s to look at, and how to read each one.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::utils::{class_attr, has_class_token};

pub(super) fn parse_all(list: &[&str]) -> Vec<Selector> {
    list.iter()
        .map(|css| Selector::parse(css).expect("valid serp selector"))
        .collect()
}

/// How a probe names the raw kind of a matched block.
pub(super) enum KindRule {
    Fixed(&'static str),
    Subject,
    Service,
    Fallback,
}

/// Title used when no heading-like descendant qualifies.
pub(super) enum LabelRule {
    Fixed(&'static str),
    SubjectClass,
    ServiceClass,
    /// `news_area` → `News`; no label (block skipped) without such a class.
    ClassName,
}

pub(super) enum DescribeRule {
    Fixed(&'static str),
    /// `네이버 뉴스 섹션 (3개 항목)`
    Counted,
    /// First paragraph or desc/summary text inside the block, else `-`.
    FromElement,
}

pub(super) struct Recipe {
    pub titles: Vec<Selector>,
    pub items: Vec<Selector>,
    /// Feed item selectors; empty means the block carries no feeds.
    pub feeds: Vec<Selector>,
    pub link: bool,
    pub kind: KindRule,
    pub label: LabelRule,
    pub describe: DescribeRule,
    /// Loose probes also match buttons and toolbars; drop titles that look like UI chrome.
    pub reject_chrome: bool,
}

pub(super) struct Probe {
    pub targets: Vec<Selector>,
    pub recipe: Recipe,
}

const BASIC_TITLES: &[&str] = &[
    "h2",
    "h3",
    "div[class*=\"title\"]",
    "span[class*=\"title\"]",
];

const BASIC_ITEMS: &[&str] = &["li", "div[class*=\"item\"]", "a[class*=\"link\"]"];

fn powerlink() -> Probe {
    Probe {
        targets: parse_all(&[
            "div[class*=\"power_link\"]",
            "div[class*=\"powerlink\"]",
            "div[class*=\"ad_area\"]",
            "div[class*=\"sponsor\"]",
            "div[class*=\"advertisement\"]",
            "div[class~=\"ad\"]",
            "div[id*=\"power_link\"]",
            "div[id*=\"ad_area\"]",
        ]),
        recipe: Recipe {
            titles: parse_all(BASIC_TITLES),
            items: parse_all(BASIC_ITEMS),
            feeds: parse_all(&[
                "li[class*=\"power_link\"]",
                "div[class*=\"power_link\"]",
                "a[class*=\"power_link\"]",
                "div[class*=\"ad_item\"]",
                "li[class*=\"ad_item\"]",
            ]),
            link: true,
            kind: KindRule::Fixed("powerlink"),
            label: LabelRule::Fixed("파워링크"),
            describe: DescribeRule::Fixed("네이버 파워링크 광고 섹션"),
            reject_chrome: false,
        },
    }
}

fn web() -> Probe {
    Probe {
        targets: parse_all(&[
            "div[class*=\"web_result\"]",
            "div[class*=\"total_wrap\"]",
            "div[class*=\"total_area\"]",
            "div[class*=\"search_result\"]",
            "div[class~=\"web\"]",
        ]),
        recipe: Recipe {
            titles: parse_all(BASIC_TITLES),
            items: parse_all(BASIC_ITEMS),
            feeds: Vec::new(),
            link: true,
            kind: KindRule::Fixed("web"),
            label: LabelRule::Fixed("웹 검색 결과"),
            describe: DescribeRule::Fixed("네이버 웹 검색 결과 섹션"),
            reject_chrome: false,
        },
    }
}

fn subject() -> Probe {
    Probe {
        targets: parse_all(&["div[class*=\"api_subject_bx\"]"]),
        recipe: Recipe {
            titles: parse_all(&[
                "h2[class*=\"api_subject_txt\"]",
                "h3[class*=\"api_subject_txt\"]",
                "div[class*=\"api_subject_txt\"]",
                "span[class*=\"api_subject_txt\"]",
                "h2",
                "h3",
                "div[class*=\"title\"]",
                "span[class*=\"title\"]",
            ]),
            items: parse_all(&[
                "li",
                "div[class*=\"item\"]",
                "div[class*=\"card\"]",
                "a[class*=\"link\"]",
                "div[class*=\"list\"] div",
                "div[class*=\"api_item\"]",
                "div[class*=\"api_list\"] div",
            ]),
            feeds: parse_all(&[
                "li[class*=\"api_item\"]",
                "div[class*=\"api_item\"]",
                "div[class*=\"item\"]",
                "a[class*=\"link\"]",
                "div[class*=\"list\"] div[class*=\"item\"]",
                "ul li",
                "div[class*=\"list\"] li",
                "a[href]",
                "li",
                "div[class*=\"link\"]",
                "span[class*=\"link\"]",
            ]),
            link: false,
            kind: KindRule::Subject,
            label: LabelRule::SubjectClass,
            describe: DescribeRule::Counted,
            reject_chrome: false,
        },
    }
}

fn service() -> Probe {
    Probe {
        targets: parse_all(&[
            "div[class*=\"naver_service\"]",
            "div[class*=\"service_link\"]",
            "div[class*=\"service_list\"]",
            "div[class*=\"stock\"]",
            "div[class*=\"finance\"]",
            "div[class*=\"widget\"]",
            "div[class*=\"tool\"]",
            "div[class*=\"utility\"]",
            "div[class*=\"info_area\"]",
            "div[class*=\"summary_area\"]",
            "div[class*=\"card_area\"]",
        ]),
        recipe: Recipe {
            titles: parse_all(&[
                "h1",
                "h2",
                "h3",
                "div[class*=\"title\"]",
                "div[class*=\"tit\"]",
                "div[class*=\"head\"]",
                "span[class*=\"title\"]",
                "a[class*=\"title\"]",
            ]),
            items: parse_all(&[
                "li",
                "div[class*=\"item\"]",
                "div[class*=\"card\"]",
                "a[class*=\"link\"]",
                "div[class*=\"list\"] div",
            ]),
            feeds: Vec::new(),
            link: false,
            kind: KindRule::Service,
            label: LabelRule::ServiceClass,
            describe: DescribeRule::Counted,
            reject_chrome: false,
        },
    }
}

fn vertical(
    kind: &'static str,
    label: &'static str,
    describe: &'static str,
    targets: &[&str],
) -> Probe {
    Probe {
        targets: parse_all(targets),
        recipe: Recipe {
            titles: parse_all(BASIC_TITLES),
            items: parse_all(BASIC_ITEMS),
            feeds: Vec::new(),
            link: true,
            kind: KindRule::Fixed(kind),
            label: LabelRule::Fixed(label),
            describe: DescribeRule::Fixed(describe),
            reject_chrome: false,
        },
    }
}

fn verticals() -> Vec<Probe> {
    vec![
        vertical(
            "news",
            "뉴스",
            "네이버 뉴스 섹션",
            &["div[class*=\"news\"]", "div[id*=\"news\"]"],
        ),
        vertical(
            "blog",
            "블로그",
            "네이버 블로그 섹션",
            &["div[class*=\"blog\"]", "div[id*=\"blog\"]"],
        ),
        vertical(
            "cafe",
            "카페",
            "네이버 카페 섹션",
            &["div[class*=\"cafe\"]", "div[id*=\"cafe\"]"],
        ),
        vertical(
            "kin",
            "지식iN",
            "네이버 지식iN 섹션",
            &[
                "div[class*=\"kin_\"]",
                "div[class~=\"kin\"]",
                "div[id*=\"kin\"]",
            ],
        ),
        vertical(
            "shopping",
            "쇼핑",
            "네이버 쇼핑 섹션",
            &[
                "div[class*=\"shopping\"]",
                "div[id*=\"shopping\"]",
                "div[class*=\"shop_\"]",
            ],
        ),
        vertical(
            "image",
            "이미지",
            "네이버 이미지 섹션",
            &["div[class*=\"image\"]", "div[id*=\"image\"]"],
        ),
        vertical(
            "video",
            "동영상",
            "네이버 동영상 섹션",
            &["div[class*=\"video\"]", "div[id*=\"video\"]"],
        ),
        vertical(
            "related",
            "함께 많이 찾는",
            "함께 많이 찾는 검색어 섹션",
            &["div[class*=\"related\"]", "div[id*=\"related\"]"],
        ),
    ]
}

/// Primary battery, in detection order.
pub(super) static PRIMARY: Lazy<Vec<Probe>> = Lazy::new(|| {
    let mut battery = vec![powerlink(), web(), subject(), service()];
    battery.extend(verticals());
    battery
});

/// Looser battery, only run when the primary one found nothing.
pub(super) static FALLBACK: Lazy<Probe> = Lazy::new(|| Probe {
    targets: parse_all(&[
        "div[class*=\"power\"]",
        "div[class*=\"ad\"]",
        "div[id*=\"power\"]",
        "div[class*=\"news\"]",
        "div[class*=\"blog\"]",
        "div[class*=\"cafe\"]",
        "div[class*=\"kin\"]",
        "div[class*=\"shopping\"]",
        "div[class*=\"image\"]",
        "div[class*=\"video\"]",
        "div[class*=\"book\"]",
        "div[class*=\"dict\"]",
        "div[class*=\"encyc\"]",
        "div[class*=\"related\"]",
        "div[class*=\"_area\"]",
        "div[class*=\"_wrap\"]",
        "div[class*=\"section\"]",
    ]),
    recipe: Recipe {
        titles: parse_all(&[
            "h2",
            "h3",
            "h4",
            "div[class*=\"title\"]",
            "div[class*=\"tit\"]",
            "div[class*=\"head\"]",
            "div[class*=\"header\"]",
            "span[class*=\"title\"]",
            "span[class*=\"tit\"]",
        ]),
        items: parse_all(&[
            "li",
            "div[class*=\"item\"]",
            "div[class*=\"card\"]",
            "div[class*=\"box\"]",
            "a[class*=\"link\"]",
            "div[class*=\"list\"] div",
        ]),
        feeds: Vec::new(),
        link: false,
        kind: KindRule::Fallback,
        label: LabelRule::ClassName,
        describe: DescribeRule::FromElement,
        reject_chrome: true,
    },
});

impl KindRule {
    pub(super) fn resolve(&self, element: ElementRef<'_>, title: &str) -> &'static str {
        let class = class_attr(element);
        let title = title.to_lowercase();
        let either = |class_needle: &str, title_needle: &str| {
            class.contains(class_needle) || title.contains(title_needle)
        };

        match self {
            Self::Fixed(kind) => *kind,
            Self::Subject => {
                if class.contains("power")
                    || has_class_token(element, "ad")
                    || title.contains("파워링크")
                {
                    "powerlink"
                } else if either("news", "뉴스") {
                    "news"
                } else if either("blog", "블로그") {
                    "blog"
                } else if either("cafe", "카페") {
                    "cafe"
                } else if either("kin", "지식") {
                    "kin"
                } else if either("shopping", "쇼핑") {
                    "shopping"
                } else if either("image", "이미지") {
                    "image"
                } else if either("video", "동영상") {
                    "video"
                } else if either("book", "도서") {
                    "book"
                } else if either("dict", "사전") {
                    "dictionary"
                } else {
                    "unknown"
                }
            }
            Self::Service => {
                if either("service", "서비스") {
                    "service"
                } else if class.contains("stock") || either("finance", "증권") {
                    "stock"
                } else if either("news", "뉴스") {
                    "news"
                } else if either("info", "정보") || class.contains("summary") {
                    "info"
                } else if either("widget", "위젯") {
                    "widget"
                } else if either("card", "카드") {
                    "card"
                } else if either("tool", "도구") || class.contains("utility") {
                    "tool"
                } else {
                    "unknown"
                }
            }
            Self::Fallback => {
                const BY_CLASS: &[(&str, &str)] = &[
                    ("power", "powerlink"),
                    ("news", "news"),
                    ("blog", "blog"),
                    ("cafe", "cafe"),
                    ("image", "image"),
                    ("video", "video"),
                    ("shopping", "shopping"),
                    ("encyc", "encyclopedia"),
                    ("knowledge", "knowledge"),
                    ("kin", "kin"),
                    ("book", "book"),
                    ("movie", "movie"),
                    ("music", "music"),
                    ("local", "local"),
                    ("stock", "stock"),
                    ("weather", "weather"),
                    ("dict", "dictionary"),
                    ("translate", "translate"),
                    ("calculator", "calculator"),
                    ("related", "related"),
                ];
                const BY_TITLE: &[(&str, &str)] = &[
                    ("뉴스", "news"),
                    ("블로그", "blog"),
                    ("카페", "cafe"),
                    ("이미지", "image"),
                    ("동영상", "video"),
                    ("쇼핑", "shopping"),
                    ("백과", "encyclopedia"),
                    ("지식", "knowledge"),
                    ("도서", "book"),
                    ("영화", "movie"),
                    ("음악", "music"),
                    ("날씨", "weather"),
                    ("사전", "dictionary"),
                    ("번역", "translate"),
                    ("계산", "calculator"),
                ];

                BY_CLASS
                    .iter()
                    .find(|(needle, _)| class.contains(needle))
                    .or_else(|| BY_TITLE.iter().find(|(needle, _)| title.contains(needle)))
                    .map(|(_, kind)| *kind)
                    .unwrap_or("unknown")
            }
        }
    }
}

impl LabelRule {
    pub(super) fn resolve(&self, element: ElementRef<'_>) -> Option<String> {
        let class = class_attr(element);
        let label = match self {
            Self::Fixed(label) => *label,
            Self::SubjectClass => {
                const LABELS: &[(&str, &str)] = &[
                    ("news", "뉴스"),
                    ("blog", "블로그"),
                    ("cafe", "카페"),
                    ("kin", "지식iN"),
                    ("shopping", "쇼핑"),
                    ("image", "이미지"),
                    ("video", "동영상"),
                    ("book", "도서"),
                    ("dict", "사전"),
                    ("power", "파워링크"),
                ];
                match LABELS.iter().find(|(needle, _)| class.contains(needle)) {
                    Some((_, label)) => label,
                    None if has_class_token(element, "ad") => "파워링크",
                    None => "검색 결과",
                }
            }
            Self::ServiceClass => {
                const LABELS: &[(&str, &str)] = &[
                    ("service", "네이버 서비스"),
                    ("stock", "증권정보"),
                    ("finance", "증권정보"),
                    ("news", "뉴스"),
                    ("info", "기본정보"),
                    ("widget", "네이버 위젯"),
                    ("card", "네이버 카드"),
                    ("tool", "네이버 도구"),
                ];
                LABELS
                    .iter()
                    .find(|(needle, _)| class.contains(needle))
                    .map(|(_, label)| *label)
                    .unwrap_or("네이버 섹션")
            }
            Self::ClassName => return class_derived_title(element),
        };
        Some(label.to_string())
    }
}

/// `news_area` → `News`, `related_srch_wrap` → `Related srch`.
pub(super) fn class_derived_title(element: ElementRef<'_>) -> Option<String> {
    let class = element.value().attr("class")?;
    let part = class
        .split_whitespace()
        .find(|part| part.contains("_area") || part.contains("_wrap"))?;

    let stripped = part
        .replace("_area", "")
        .replace("_wrap", "")
        .replace("_section", "")
        .replace('_', " ");
    let stripped = stripped.trim();

    let mut chars = stripped.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

impl DescribeRule {
    pub(super) fn render(&self, element: ElementRef<'_>, kind: &str, item_count: usize) -> String {
        match self {
            Self::Fixed(text) => text.to_string(),
            Self::Counted => {
                let base = match kind {
                    "powerlink" => "네이버 파워링크 광고 섹션",
                    "news" => "네이버 뉴스 섹션",
                    "blog" => "네이버 블로그 섹션",
                    "cafe" => "네이버 카페 섹션",
                    "kin" => "네이버 지식iN 섹션",
                    "shopping" => "네이버 쇼핑 섹션",
                    "image" => "네이버 이미지 섹션",
                    "video" => "네이버 동영상 섹션",
                    "book" => "네이버 도서 섹션",
                    "dictionary" => "네이버 사전 섹션",
                    "service" => "네이버 서비스 섹션",
                    "stock" => "네이버 증권정보 섹션",
                    "info" => "네이버 정보 섹션",
                    "widget" => "네이버 위젯 섹션",
                    "card" => "네이버 카드 섹션",
                    "tool" => "네이버 도구 섹션",
                    _ => "네이버 검색 섹션",
                };
                format!("{base} ({item_count}개 항목)")
            }
            Self::FromElement => {
                static DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
                    Selector::parse("p, div[class*=\"desc\"], div[class*=\"summary\"]")
                        .expect("valid description selector")
                });
                element
                    .select(&DESCRIPTION)
                    .next()
                    .map(super::utils::element_text)
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| "-".to_string())
            }
        }
    }
}
