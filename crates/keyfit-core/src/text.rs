//! Text processing utilities.
//!
//! Provides normalization, whole-word matching, and the tokenizers used by
//! the classifier and the mock generators.

use regex::{Regex, RegexBuilder};

use crate::word_lists::STOP_WORDS;

/// Minimum length for a word to count as significant.
const MIN_SIGNIFICANT_LEN: usize = 3;

/// Trim surrounding whitespace and lowercase.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Build the whole-word pattern for `keyword`.
///
/// A boundary is the start or end of the string, whitespace, or punctuation.
/// The keyword itself is matched literally.
pub fn word_boundary_pattern(keyword: &str) -> String {
    format!(
        r"(?:^|[\s\p{{P}}]){}(?:$|[\s\p{{P}}])",
        regex::escape(keyword.trim())
    )
}

/// Compile a case-insensitive whole-word regex for `keyword`.
///
/// Returns `None` for a blank keyword or a pattern the regex engine rejects.
pub fn whole_word_regex(keyword: &str) -> Option<Regex> {
    if keyword.trim().is_empty() {
        return None;
    }
    match RegexBuilder::new(&word_boundary_pattern(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(keyword, error = %e, "keyword pattern rejected, treating as absent");
            None
        }
    }
}

/// Whether `keyword` occurs in `haystack` as a whole word (case-insensitive).
pub fn contains_whole_word(haystack: &str, keyword: &str) -> bool {
    whole_word_regex(keyword).is_some_and(|re| re.is_match(haystack))
}

/// Tokenize content for phrase extraction.
///
/// Splits on whitespace, strips leading and trailing punctuation (inner `'`
/// and `-` survive), lowercases, and drops empty tokens.
pub fn phrase_tokens(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .map(strip_punctuation)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Lowercased words of at least three characters that are not stop words.
pub fn significant_words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| is_significant(w))
        .collect()
}

/// Whether a lowercased word carries keyword signal.
pub fn is_significant(word: &str) -> bool {
    word.chars().count() >= MIN_SIGNIFICANT_LEN
        && word.chars().any(char::is_alphanumeric)
        && !STOP_WORDS.contains(word)
}

/// Strip leading and trailing non-alphanumeric characters.
///
/// Inner apostrophes and hyphens (`don't`, `all-day`) are kept; a token made
/// only of punctuation becomes empty.
pub fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whether a raw whitespace token closes a sentence.
pub fn ends_sentence(raw_token: &str) -> bool {
    raw_token
        .trim_end_matches(['"', '\'', ')', ']'])
        .ends_with(['.', '!', '?'])
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
