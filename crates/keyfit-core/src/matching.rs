//! Keyword matching predicates.
//!
//! The classifier's building blocks: exact matches, stem-level partial
//! matches, and top-position relevance over a ranked keyword list.

use crate::model::KeywordEntry;
use crate::text::{normalize, significant_words};

/// Shortest common prefix that counts as topical relevance.
pub const RELEVANCE_PREFIX_LEN: usize = 4;

/// Default number of leading keyword entries consulted for relevance.
pub const DEFAULT_TOP_POSITIONS: usize = 10;

/// Derivational suffixes removed by [`stem`], longest first.
const SUFFIXES: &[&str] = &[
    "ingly", "edly", "ation", "ness", "ment", "able", "ible", "ing", "ed", "ly",
];

/// Reduce a word to a light stem.
///
/// Plurals are folded first (`ies` → `y`, `sses` → `ss`, trailing `s`
/// dropped unless the word ends in `ss` or `us`), then the first matching
/// suffix is removed as long as three characters remain.
pub fn stem(word: &str) -> String {
    let mut w = word.to_lowercase();

    if let Some(base) = w.strip_suffix("ies")
        && base.len() >= 2
    {
        w = format!("{base}y");
    } else if w.ends_with("sses") {
        w.truncate(w.len() - 2);
    } else if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") {
        w.pop();
    }

    for suffix in SUFFIXES {
        if let Some(base) = w.strip_suffix(suffix)
            && base.chars().count() >= 3
        {
            return base.to_string();
        }
    }
    w
}

/// Case- and whitespace-insensitive equality. Blank inputs never match.
pub fn is_exact_match(keyword: &str, text: &str) -> bool {
    let k = normalize(keyword);
    !k.is_empty() && k == normalize(text)
}

/// Token overlap or stem-level similarity that falls short of an exact match.
pub fn is_partial_match(keyword: &str, text: &str) -> bool {
    if is_exact_match(keyword, text) {
        return false;
    }
    let keyword_stems: Vec<String> = significant_words(keyword).iter().map(|w| stem(w)).collect();
    if keyword_stems.is_empty() {
        return false;
    }
    significant_words(text)
        .iter()
        .map(|w| stem(w))
        .any(|s| keyword_stems.contains(&s))
}

/// Whether `keyword` is relevant to one of the `n` highest-relevance entries.
///
/// An entry is relevant when it matches exactly or partially, or when a
/// significant word of each shares a prefix of at least
/// [`RELEVANCE_PREFIX_LEN`] characters.
pub fn is_in_top_positions(keyword: &str, keywords: &[KeywordEntry], n: usize) -> bool {
    let keyword_words = significant_words(keyword);
    top_entries(keywords, n).into_iter().any(|entry| {
        is_exact_match(keyword, &entry.text)
            || is_partial_match(keyword, &entry.text)
            || significant_words(&entry.text)
                .iter()
                .any(|ew| keyword_words.iter().any(|kw| shares_prefix(kw, ew)))
    })
}

/// The `n` entries with the highest relevance; ties keep list order.
pub fn top_entries(keywords: &[KeywordEntry], n: usize) -> Vec<&KeywordEntry> {
    let mut ranked: Vec<&KeywordEntry> = keywords.iter().collect();
    ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    ranked.truncate(n);
    ranked
}

fn shares_prefix(a: &str, b: &str) -> bool {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
        >= RELEVANCE_PREFIX_LEN
}
