//! Concept extraction for raw-text analysis.

use std::collections::HashMap;

use crate::model::Concept;
use crate::text::{is_significant, round2};

const MIN_OCCURRENCES: usize = 2;
const MAX_RELEVANCE: f64 = 0.9;

/// Recurring significant words, title-cased.
///
/// A word must occur at least twice. Relevance is `0.9 * count / max_count`.
pub fn extract_concepts(tokens: &[String], limit: usize) -> Vec<Concept> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens.iter().filter(|t| is_significant(t)) {
        *counts.entry(token.as_str()).or_default() += 1;
    }
    counts.retain(|_, count| *count >= MIN_OCCURRENCES);

    let Some(max_count) = counts.values().copied().max() else {
        return Vec::new();
    };

    let mut concepts: Vec<Concept> = counts
        .into_iter()
        .map(|(word, count)| Concept {
            text: title_case(word),
            relevance: round2(MAX_RELEVANCE * count as f64 / max_count as f64),
        })
        .collect();
    concepts.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| a.text.cmp(&b.text))
    });
    concepts.truncate(limit);
    concepts
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
