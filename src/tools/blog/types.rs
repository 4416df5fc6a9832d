use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tools::types::BlogItem;

/// Title shape of a post, also used for the style read from its snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitlePattern {
    #[serde(rename = "숫자형(리스트)")]
    Numbered,
    #[serde(rename = "감탄/의문형")]
    Exclamatory,
    #[serde(rename = "가이드형")]
    Guide,
    #[serde(rename = "후기형")]
    Review,
    #[serde(rename = "비교형")]
    Comparison,
    #[serde(rename = "괄호형")]
    Bracketed,
    #[serde(rename = "간결형")]
    Concise,
    #[serde(rename = "설명형")]
    Descriptive,
}

impl TitlePattern {
    pub fn label(&self) -> &'static str {
        match self {
            TitlePattern::Numbered => "숫자형(리스트)",
            TitlePattern::Exclamatory => "감탄/의문형",
            TitlePattern::Guide => "가이드형",
            TitlePattern::Review => "후기형",
            TitlePattern::Comparison => "비교형",
            TitlePattern::Bracketed => "괄호형",
            TitlePattern::Concise => "간결형",
            TitlePattern::Descriptive => "설명형",
        }
    }
}

impl fmt::Display for TitlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoKeyword {
    pub keyword: String,
    pub count: usize,
}

/// Report over blog search snippets (title and description only).
#[derive(Debug, Clone, Serialize)]
pub struct SnippetReport {
    pub summary: SnippetSummary,
    pub top_posts: Vec<SnippetPost>,
    pub keyword_analysis: KeywordAnalysis,
    pub title_style: TitleStyle,
    pub co_keywords: Vec<CoKeyword>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnippetSummary {
    pub total_docs: usize,
    pub avg_chars: usize,
    pub avg_paragraphs: f64,
    pub avg_keyword_density_pct: f64,
    pub top_title_types: Vec<TitlePattern>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnippetPost {
    pub title: String,
    pub url: String,
    pub keyword_count: usize,
    pub keyword_density_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub total_count: usize,
    pub avg_density_pct: f64,
    pub positions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleStyle {
    pub top_title_patterns: Vec<TitlePattern>,
    pub style_examples: Vec<TitlePattern>,
}

/// A post to analyze: its listing entry plus the fetched body, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(flatten)]
    pub item: BlogItem,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<BlogItem> for PostDocument {
    fn from(item: BlogItem) -> Self {
        PostDocument { item, body: None }
    }
}

/// Report over full posts.
#[derive(Debug, Clone, Serialize)]
pub struct PostReport {
    pub summary: PostSummary,
    pub title_summary: TitleSummary,
    pub co_keywords: Vec<CoKeyword>,
    pub top_posts: Vec<PostDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub total_docs: usize,
    pub avg_chars: usize,
    pub avg_paragraphs: f64,
    pub avg_keyword_density_pct: f64,
    pub avg_sentences_per_post: f64,
    pub avg_sentence_len_chars: f64,
    pub avg_images_per_post: f64,
    pub avg_numbers_per_post: f64,
    pub avg_exclamations_per_post: f64,
    pub avg_links_per_post: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleSummary {
    pub top_title_patterns: Vec<TitlePattern>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub title: String,
    pub url: String,
    pub keyword_count: usize,
    pub keyword_density_pct: f64,
    pub char_count: usize,
    /// Character index of the first keyword hit
    pub first_occurrence: Option<usize>,
    pub first_occurrence_section: &'static str,
    pub densest_sentence: String,
    pub densest_sentence_density_pct: f64,
    pub content_preview: String,
    pub image_count: usize,
    pub link_count: usize,
}
