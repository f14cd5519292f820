//! High-priority literal tokens.
//!
//! A keyword containing one of these tokens is always checked directly
//! against the analyzed text as a whole word, and phrases containing one are
//! reported as entities. Matching is case-insensitive substring containment.

use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use crate::error::{MockError, MockResult};

/// Tokens used when none are configured.
pub const DEFAULT_PRIORITY_TOKENS: &[&str] = &["bra"];

/// Entity type assigned to priority detections when none is configured.
pub const DEFAULT_PRIORITY_ENTITY_TYPE: &str = "ProductType";

static DEFAULT: LazyLock<PriorityTokens> = LazyLock::new(|| {
    PriorityTokens::new(DEFAULT_PRIORITY_TOKENS, DEFAULT_PRIORITY_ENTITY_TYPE)
        .expect("valid default priority tokens")
});

/// A compiled set of priority tokens.
#[derive(Debug, Clone)]
pub struct PriorityTokens {
    tokens: Vec<String>,
    entity_type: String,
    automaton: Option<AhoCorasick>,
}

impl PriorityTokens {
    /// Compile `tokens`. Blank tokens are ignored; an empty set matches nothing.
    pub fn new<S: AsRef<str>>(tokens: &[S], entity_type: &str) -> MockResult<Self> {
        let tokens: Vec<String> = tokens
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let automaton = if tokens.is_empty() {
            None
        } else {
            let ac = AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostLongest)
                .ascii_case_insensitive(true)
                .build(&tokens)
                .map_err(|e| MockError::PriorityTokens(e.to_string()))?;
            Some(ac)
        };

        tracing::debug!(?tokens, entity_type, "compiled priority tokens");
        Ok(Self {
            tokens,
            entity_type: entity_type.to_string(),
            automaton,
        })
    }

    /// The built-in token set.
    pub fn builtin() -> &'static Self {
        &DEFAULT
    }

    /// Whether `text` contains any priority token.
    ///
    /// Text is lowercased first so non-ASCII case differences fold too.
    pub fn matches(&self, text: &str) -> bool {
        self.automaton
            .as_ref()
            .is_some_and(|ac| ac.is_match(&text.to_lowercase()))
    }

    /// The configured tokens, lowercased.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Entity type for priority detections.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }
}

impl Default for PriorityTokens {
    fn default() -> Self {
        DEFAULT.clone()
    }
}
