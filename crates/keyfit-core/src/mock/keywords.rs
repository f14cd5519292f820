//! Keyword extraction for raw-text analysis.

use std::collections::HashMap;

use crate::model::KeywordEntry;
use crate::text::{ends_sentence, is_significant, round2, strip_punctuation};

const BASE_RELEVANCE: f64 = 0.4;
const FREQUENCY_WEIGHT: f64 = 0.5;
const BIGRAM_BONUS: f64 = 0.05;
const MAX_RELEVANCE: f64 = 0.99;

struct Candidate {
    text: String,
    count: usize,
    bigram: bool,
}

/// Rank significant unigrams and bigrams by frequency.
///
/// A bigram is two adjacent words of the same sentence that are both
/// significant. Relevance is `0.4 + 0.5 * count / max_count`, with a small
/// bonus for bigrams. Ties sort by count, then alphabetically.
pub fn extract_keywords(prose: &str, limit: usize) -> Vec<KeywordEntry> {
    // (lowercased word, closes a sentence)
    let words: Vec<(String, bool)> = prose
        .split_whitespace()
        .filter_map(|raw| {
            let word = strip_punctuation(raw);
            (!word.is_empty()).then(|| (word.to_lowercase(), ends_sentence(raw)))
        })
        .collect();

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut bump = |text: String, bigram: bool| {
        if let Some(&i) = index.get(&text) {
            candidates[i].count += 1;
        } else {
            index.insert(text.clone(), candidates.len());
            candidates.push(Candidate {
                text,
                count: 1,
                bigram,
            });
        }
    };

    for (i, (word, closes_sentence)) in words.iter().enumerate() {
        if !is_significant(word) {
            continue;
        }
        bump(word.clone(), false);
        if !closes_sentence
            && let Some((next, _)) = words.get(i + 1)
            && is_significant(next)
        {
            bump(format!("{word} {next}"), true);
        }
    }

    let Some(max_count) = candidates.iter().map(|c| c.count).max() else {
        return Vec::new();
    };

    let mut entries: Vec<KeywordEntry> = candidates
        .into_iter()
        .map(|c| {
            let mut relevance = BASE_RELEVANCE + FREQUENCY_WEIGHT * c.count as f64 / max_count as f64;
            if c.bigram {
                relevance += BIGRAM_BONUS;
            }
            KeywordEntry::new(c.text, round2(relevance.min(MAX_RELEVANCE)), c.count)
        })
        .collect();

    entries.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.text.cmp(&b.text))
    });
    entries.truncate(limit);
    tracing::debug!(count = entries.len(), max_count, "keywords extracted");
    entries
}
