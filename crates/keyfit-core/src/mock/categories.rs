//! Taxonomy categories for raw-text analysis.

use std::collections::HashMap;

use crate::matching::stem;
use crate::model::Category;
use crate::text::{is_significant, round2};
use crate::word_lists::CATEGORY_TAXONOMY;

/// Score taxonomy categories by the share of matching words.
///
/// Each significant token is looked up as-is, then by its stem. A category's
/// score is its hits divided by all hits.
pub fn classify_categories(tokens: &[String], limit: usize) -> Vec<Category> {
    let mut hits: HashMap<&'static str, usize> = HashMap::new();
    for token in tokens.iter().filter(|t| is_significant(t)) {
        let label = CATEGORY_TAXONOMY
            .get(token.as_str())
            .or_else(|| CATEGORY_TAXONOMY.get(stem(token).as_str()));
        if let Some(label) = label {
            *hits.entry(*label).or_default() += 1;
        }
    }

    let total: usize = hits.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut categories: Vec<Category> = hits
        .into_iter()
        .map(|(label, count)| Category {
            label: label.to_string(),
            score: round2(count as f64 / total as f64),
        })
        .collect();
    categories.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.label.cmp(&b.label))
    });
    categories.truncate(limit);
    tracing::debug!(total_hits = total, count = categories.len(), "categories scored");
    categories
}
