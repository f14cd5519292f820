//! Contiguous phrase windows over a token stream.

/// Longest phrase, in tokens, considered by the generators.
pub const MAX_PHRASE_TOKENS: usize = 3;

/// A phrase and how many tokens it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Tokens joined by single spaces.
    pub text: String,
    /// Number of tokens.
    pub len: usize,
}

/// All phrases of 1 to `max_len` tokens.
///
/// Ordered by start position, then by length, so `a b c` yields
/// `a`, `a b`, `a b c`, `b`, `b c`, `c`.
pub fn phrase_windows(tokens: &[String], max_len: usize) -> Vec<Phrase> {
    let mut phrases = Vec::new();
    for start in 0..tokens.len() {
        for len in 1..=max_len {
            let Some(window) = tokens.get(start..start + len) else {
                break;
            };
            phrases.push(Phrase {
                text: window.join(" "),
                len,
            });
        }
    }
    phrases
}
