use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::hash::Hash;

use super::types::{CoKeyword, TitlePattern};

/// Density is scaled so typical keyword rates land in a readable range.
pub(super) const DENSITY_SCALE: f64 = 40.0;

const LEAD_CHARS: usize = 30;
const TAIL_CHARS: usize = 120;
const CONCISE_TITLE_CHARS: usize = 16;

const STOPWORDS: &[&str] = &[
    "그리고", "그", "이", "저", "는", "은", "가", "을", "를", "에", "의", "와", "과", "too", "the",
    "a", "an", "of", "to", "in", "on",
];

const SENTENCE_ENDS: &[char] = &['.', '!', '?', '。', '！', '？'];

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid regex"));
static GUIDE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"방법|가이드|Tip|TIP").expect("valid regex"));
static REVIEW: Lazy<Regex> = Lazy::new(|| Regex::new(r"후기|리뷰|경험").expect("valid regex"));
static COMPARISON_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)비교|vs|대비").expect("valid regex"));
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(\[][^)\]]+[)\]]").expect("valid regex"));
static GUIDE_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bTip\b|꿀팁|방법").expect("valid regex"));
static COMPARISON_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"비교|대비").expect("valid regex"));
static IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img[^>]*>").expect("valid regex"));
static IMG_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"']+\.(jpg|jpeg|png|gif|webp|bmp|svg)(\?[^\s<>"']*)?"#)
        .expect("valid regex")
});
static IMG_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(이미지|사진|그림|img|image|photo|picture)\b").expect("valid regex")
});
static LINK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<a[^>]*href[^>]*>").expect("valid regex"));
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)https?://[^\s<>"']+"#).expect("valid regex"));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

pub(super) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Scaled keyword density in percent, two decimals.
pub(super) fn density_pct(count: usize, chars: usize) -> f64 {
    if chars == 0 {
        return 0.0;
    }
    round_to(count as f64 / chars as f64 * 100.0 * DENSITY_SCALE, 2)
}

/// Mean rounded to two decimals, 0 for an empty slice.
pub(super) fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round_to(values.iter().sum::<f64>() / values.len() as f64, 2)
}

/// Case-insensitive, non-overlapping occurrences of `keyword` (already lowercased).
pub(super) fn count_occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(keyword).count()
}

/// Character index of the first case-insensitive hit.
pub(super) fn find_char_index(text: &str, keyword: &str) -> Option<usize> {
    if keyword.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    lower
        .find(keyword)
        .map(|byte_idx| lower[..byte_idx].chars().count())
}

/// Where the keyword shows up: anywhere, in the closing 120 characters, in the lead.
pub(super) fn keyword_positions(text: &str, keyword: &str) -> Vec<&'static str> {
    let mut positions = Vec::new();
    let Some(first) = find_char_index(text, keyword) else {
        return positions;
    };

    positions.push("본문 초반");

    let len = text.chars().count();
    let skip = len.saturating_sub(TAIL_CHARS);
    let tail: String = text.chars().skip(skip).collect();
    if find_char_index(&tail, keyword).is_some() {
        positions.push("본문 하단");
    }
    if first < LEAD_CHARS {
        positions.push("제목/리드");
    }
    positions
}

/// A standalone one- or two-digit number (`7`, `10`), as list titles carry.
fn has_short_number(title: &str) -> bool {
    let chars: Vec<char> = title.chars().collect();
    let is_word = |c: &char| c.is_ascii_alphanumeric() || *c == '_';

    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let before_ok = start == 0 || !is_word(&chars[start - 1]);
        let after_ok = i == chars.len() || !is_word(&chars[i]);
        if i - start <= 2 && before_ok && after_ok {
            return true;
        }
    }
    false
}

/// Coarse title shape used for search snippets.
pub fn classify_title(title: &str) -> TitlePattern {
    let title = title.trim();
    if has_short_number(title) {
        TitlePattern::Numbered
    } else if title.contains(['!', '?']) {
        TitlePattern::Exclamatory
    } else if title.chars().count() <= CONCISE_TITLE_CHARS {
        TitlePattern::Concise
    } else {
        TitlePattern::Descriptive
    }
}

/// Finer title shape used for full posts.
pub fn classify_title_extended(title: &str) -> TitlePattern {
    let title = title.trim();
    if has_short_number(title) {
        TitlePattern::Numbered
    } else if title.contains(['!', '?']) {
        TitlePattern::Exclamatory
    } else if GUIDE_TITLE.is_match(title) {
        TitlePattern::Guide
    } else if REVIEW.is_match(title) {
        TitlePattern::Review
    } else if COMPARISON_TITLE.is_match(title) {
        TitlePattern::Comparison
    } else if BRACKETED.is_match(title) {
        TitlePattern::Bracketed
    } else if title.chars().count() <= CONCISE_TITLE_CHARS {
        TitlePattern::Concise
    } else {
        TitlePattern::Descriptive
    }
}

/// Writing style suggested by a snippet, if any.
pub fn infer_style(description: &str) -> Option<TitlePattern> {
    if GUIDE_STYLE.is_match(description) {
        Some(TitlePattern::Guide)
    } else if REVIEW.is_match(description) {
        Some(TitlePattern::Review)
    } else if COMPARISON_STYLE.is_match(description) {
        Some(TitlePattern::Comparison)
    } else {
        None
    }
}

/// Sentences ending in `.`, `!`, `?` or their full-width forms; line breaks are ignored.
pub(super) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch == '\r' || ch == '\n' {
            current.push(' ');
            continue;
        }
        current.push(ch);
        if SENTENCE_ENDS.contains(&ch) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    sentences.push(current);

    sentences
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Sentence count and mean sentence length (one decimal).
pub(super) fn sentence_stats(text: &str) -> (usize, f64) {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return (0, 0.0);
    }
    let total: usize = sentences.iter().map(|s| s.chars().count()).sum();
    let mean = total as f64 / sentences.len() as f64;
    (sentences.len(), round_to(mean, 1))
}

/// Sentence with the highest keyword density, and that density.
pub(super) fn densest_sentence(text: &str, keyword: &str) -> (String, f64) {
    let mut best = (String::new(), 0.0);
    for sentence in split_sentences(text) {
        let count = count_occurrences(&sentence, keyword);
        let density = density_pct(count, sentence.chars().count());
        if density > best.1 {
            best = (sentence, density);
        }
    }
    best
}

/// Image hints: `<img>` tags, image URLs and image words.
pub(super) fn count_images(text: &str) -> usize {
    let tags = IMG_TAG.find_iter(text).count();
    let urls = IMG_URL.find_iter(text).count();
    let words = IMG_WORD.find_iter(text).count();
    tags + urls + words
}

/// Link hints: `<a href>` tags and bare URLs.
pub(super) fn count_links(text: &str) -> usize {
    LINK_TAG.find_iter(text).count() + URL.find_iter(text).count()
}

pub(super) fn count_numbers(text: &str) -> usize {
    NUMBER.find_iter(text).count()
}

/// Tally in first-seen order, so equal counts rank by first appearance.
#[derive(Debug)]
pub(super) struct Tally<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(super) fn add(&mut self, key: K) {
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.clone(), 1);
                self.order.push(key);
            }
        }
    }

    /// The `n` most frequent keys with their counts.
    pub(super) fn top(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked: Vec<(K, usize)> = self
            .order
            .iter()
            .map(|key| (key.clone(), self.counts.get(key).copied().unwrap_or(0)))
            .collect();
        // stable: ties keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub(super) fn top_keys(&self, n: usize) -> Vec<K> {
        self.top(n).into_iter().map(|(key, _)| key).collect()
    }
}

/// Add the content words of `text` to `bag`, skipping stopwords and the keyword.
pub(super) fn accumulate_co_words(text: &str, bag: &mut Tally<String>, keyword: &str) {
    let cleaned = NON_WORD.replace_all(text, " ").to_lowercase();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < 2 || STOPWORDS.contains(&token) || token == keyword {
            continue;
        }
        bag.add(token.to_string());
    }
}

pub(super) fn top_co_keywords(bag: &Tally<String>, n: usize) -> Vec<CoKeyword> {
    bag.top(n)
        .into_iter()
        .map(|(keyword, count)| CoKeyword { keyword, count })
        .collect()
}
