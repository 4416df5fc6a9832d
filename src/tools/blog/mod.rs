//! Blog text analytics
//!
//! Keyword density, title shapes and co-occurring words over the top blog
//! posts for a keyword, either from search snippets alone or from full posts.

mod tests;
mod utils;

pub mod types;

pub use types::*;
pub use utils::{classify_title, classify_title_extended, infer_style};

use utils::*;

use crate::tools::batch::batch_ordered;
use crate::tools::clean::{clean_snippet, html_to_text};
use crate::tools::naver::fetch_post_content;
use crate::tools::types::BlogItem;

const SNIPPET_DOCS: usize = 10;
const POST_DOCS: usize = 5;
const TOP_CO_KEYWORDS: usize = 20;
const PREVIEW_CHARS: usize = 120;
const EARLY_BODY_CHARS: usize = 200;
const FETCH_CONCURRENCY: usize = 4;

fn paragraph_count(text: &str) -> usize {
    (text.matches("\n\n").count() + 1).max(1)
}

fn overall_density(total_count: usize, avg_chars: usize, docs: usize) -> f64 {
    let denominator = (avg_chars * docs).max(1);
    let ratio = total_count as f64 / denominator as f64;
    round_to(ratio * 100.0 * DENSITY_SCALE, 2)
}

/// Analyze the title and description of the first ten search results.
pub fn analyze_snippets(keyword: &str, items: &[BlogItem]) -> SnippetReport {
    let needle = keyword.trim().to_lowercase();
    let items = &items[..items.len().min(SNIPPET_DOCS)];

    let mut top_posts = Vec::with_capacity(items.len());
    let mut total_chars = 0;
    let mut total_count = 0;
    let mut paragraphs = Vec::with_capacity(items.len());
    let mut positions: Vec<&'static str> = Vec::new();
    let mut titles = Tally::default();
    let mut co_words = Tally::default();
    let mut style_examples = Vec::new();

    for item in items {
        let title = clean_snippet(&item.title);
        let description = clean_snippet(&item.description);
        let text = format!("{title}\n\n{description}");

        let chars = text.chars().count();
        let count = count_occurrences(&text, &needle);
        total_chars += chars;
        total_count += count;
        paragraphs.push(paragraph_count(&text) as f64);

        for position in keyword_positions(&text, &needle) {
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
        titles.add(classify_title(&title));
        accumulate_co_words(&description, &mut co_words, &needle);
        if let Some(style) = infer_style(&description) {
            style_examples.push(style);
        }

        top_posts.push(SnippetPost {
            title,
            url: item.link.clone(),
            keyword_count: count,
            keyword_density_pct: density_pct(count, chars),
        });
    }

    let docs = items.len();
    let avg_chars = if docs == 0 { 0 } else { total_chars / docs };
    let avg_density = overall_density(total_count, avg_chars, docs);
    positions.truncate(10);
    style_examples.truncate(5);

    tracing::debug!(keyword, docs, total_count, "snippets analyzed");

    SnippetReport {
        summary: SnippetSummary {
            total_docs: docs,
            avg_chars,
            avg_paragraphs: average(&paragraphs),
            avg_keyword_density_pct: avg_density,
            top_title_types: titles.top_keys(3),
        },
        top_posts,
        keyword_analysis: KeywordAnalysis {
            total_count,
            avg_density_pct: avg_density,
            positions,
        },
        title_style: TitleStyle {
            top_title_patterns: titles.top_keys(5),
            style_examples,
        },
        co_keywords: top_co_keywords(&co_words, TOP_CO_KEYWORDS),
    }
}

/// Section of the combined document where the first keyword hit falls.
fn occurrence_section(
    first: Option<usize>,
    title_chars: usize,
    description_chars: usize,
) -> &'static str {
    let Some(index) = first else {
        return "-";
    };
    let lead = title_chars + 2 + description_chars;
    if index < lead {
        "제목/요약"
    } else if index < lead + EARLY_BODY_CHARS {
        "본문 초반"
    } else {
        "본문 중·후반"
    }
}

fn preview(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    let head: String = body.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Analyze up to five posts, using each fetched body when present.
///
/// Bodies may be raw post HTML: images and links are counted on the markup,
/// everything else on its text.
pub fn analyze_posts(keyword: &str, docs: &[PostDocument]) -> PostReport {
    let needle = keyword.trim().to_lowercase();
    let docs = &docs[..docs.len().min(POST_DOCS)];

    let mut top_posts = Vec::with_capacity(docs.len());
    let mut total_chars = 0;
    let mut total_count = 0;
    let mut paragraphs = Vec::new();
    let mut sentences = Vec::new();
    let mut sentence_lengths = Vec::new();
    let mut images = Vec::new();
    let mut numbers = Vec::new();
    let mut exclamations = Vec::new();
    let mut links = Vec::new();
    let mut titles = Tally::default();
    let mut co_words = Tally::default();

    for doc in docs {
        let title = clean_snippet(&doc.item.title);
        let description = clean_snippet(&doc.item.description);
        let raw_body = doc.body.as_deref().unwrap_or_default();
        let body = if raw_body.contains('<') {
            html_to_text(raw_body)
        } else {
            raw_body.trim().to_string()
        };

        let mut combined = format!("{title}\n\n{description}");
        if !body.is_empty() {
            combined.push_str("\n\n");
            combined.push_str(&body);
        }
        let combined = combined.trim().to_string();
        let markup = format!("{title}\n\n{description}\n\n{raw_body}");

        let chars = combined.chars().count();
        let count = count_occurrences(&combined, &needle);
        let first = find_char_index(&combined, &needle);
        let (sentence_count, sentence_len) = sentence_stats(&combined);
        let (densest, densest_pct) = densest_sentence(&combined, &needle);
        let image_count = count_images(&markup);
        let link_count = count_links(&markup);

        total_chars += chars;
        total_count += count;
        paragraphs.push(paragraph_count(&combined) as f64);
        sentences.push(sentence_count as f64);
        sentence_lengths.push(sentence_len);
        images.push(image_count as f64);
        numbers.push(count_numbers(&combined) as f64);
        exclamations.push(combined.matches('!').count() as f64);
        links.push(link_count as f64);
        titles.add(classify_title_extended(&title));
        accumulate_co_words(&combined, &mut co_words, &needle);

        top_posts.push(PostDetail {
            url: doc.item.link.clone(),
            keyword_count: count,
            keyword_density_pct: density_pct(count, chars),
            char_count: chars,
            first_occurrence: first,
            first_occurrence_section: occurrence_section(
                first,
                title.chars().count(),
                description.chars().count(),
            ),
            densest_sentence: densest,
            densest_sentence_density_pct: densest_pct,
            content_preview: preview(&body),
            image_count,
            link_count,
            title,
        });
    }

    let total_docs = docs.len();
    let avg_chars = if total_docs == 0 {
        0
    } else {
        total_chars / total_docs
    };

    tracing::debug!(keyword, docs = total_docs, total_count, "posts analyzed");

    PostReport {
        summary: PostSummary {
            total_docs,
            avg_chars,
            avg_paragraphs: average(&paragraphs),
            avg_keyword_density_pct: overall_density(total_count, avg_chars, total_docs),
            avg_sentences_per_post: average(&sentences),
            avg_sentence_len_chars: average(&sentence_lengths),
            avg_images_per_post: average(&images),
            avg_numbers_per_post: average(&numbers),
            avg_exclamations_per_post: average(&exclamations),
            avg_links_per_post: average(&links),
        },
        title_summary: TitleSummary {
            top_title_patterns: titles.top_keys(5),
        },
        co_keywords: top_co_keywords(&co_words, TOP_CO_KEYWORDS),
        top_posts,
    }
}

/// Fetch the body of the first `limit` posts. A post that cannot be fetched
/// is kept without a body.
pub async fn fetch_post_documents(items: Vec<BlogItem>, limit: usize) -> Vec<PostDocument> {
    let items: Vec<BlogItem> = items.into_iter().take(limit).collect();

    batch_ordered(items, FETCH_CONCURRENCY, |item| async move {
        let body = match fetch_post_content(&item.link).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url = %item.link, error = %e, "post body fetch failed");
                None
            }
        };
        PostDocument { item, body }
    })
    .await
}
