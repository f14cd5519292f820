//! Keyword-focused mock analysis of edited text.
//!
//! Simulates what an analyzer would report for freshly edited copy while
//! guaranteeing that target keywords present in the copy are visible:
//!
//! 1. Copy the source result and swap in the new text.
//! 2. Each target found as a whole word becomes a 0.95 keyword; targets
//!    containing a priority token also become entities. Targets present only
//!    as substrings become `"<target> (partial)"` at 0.8.
//! 3. Supplementary phrases of 1 to 3 tokens fill the list at `0.7 - 0.1 * tokens`;
//!    phrases with a priority token become bonus entities.
//! 4. Keywords are stable-sorted by relevance and capped at 15 or fewer.
//! 5. Discovered entities precede the source's entities.

use std::collections::HashSet;

use crate::model::{AnalysisResult, Entity, KeywordEntry};
use crate::priority::PriorityTokens;
use crate::text::{self, round2};

use super::phrases::{self, MAX_PHRASE_TOKENS};

/// Default and largest cap on the keyword list.
pub const DEFAULT_MAX_KEYWORDS: usize = 15;

const TARGET_RELEVANCE: f64 = 0.95;
const TARGET_ENTITY_CONFIDENCE: f64 = 0.9;
const PARTIAL_RELEVANCE: f64 = 0.8;
const PHRASE_BASE_RELEVANCE: f64 = 0.7;
const PHRASE_LENGTH_PENALTY: f64 = 0.1;
const BONUS_ENTITY_RELEVANCE: f64 = 0.7;
const BONUS_ENTITY_CONFIDENCE: f64 = 0.8;
const MIN_PHRASE_CHARS: usize = 3;

/// Suffix marking a target that only occurs inside a longer word.
pub const PARTIAL_SUFFIX: &str = " (partial)";

/// Rewrite `source` for `content`, keeping `targets` visible.
///
/// Never fails. Blank targets are ignored, and a target absent from the
/// content is simply omitted. A target can still fall off the end of the
/// list when `max_keywords` or more entries rank at or above it.
/// `max_keywords` above [`DEFAULT_MAX_KEYWORDS`] is clamped to it.
#[tracing::instrument(skip_all, fields(content_len = content.len(), targets = targets.len()))]
pub fn optimize_keywords<S: AsRef<str>>(
    source: &AnalysisResult,
    content: &str,
    targets: &[S],
    priority: &PriorityTokens,
    max_keywords: usize,
) -> AnalysisResult {
    let lower = content.to_lowercase();
    let mut keywords: Vec<KeywordEntry> = Vec::new();
    let mut entities: Vec<Entity> = Vec::new();
    let mut seen_keywords: HashSet<String> = HashSet::new();
    let mut seen_entities: HashSet<String> = HashSet::new();

    for target in targets {
        let keyword = target.as_ref().trim();
        if keyword.is_empty() {
            continue;
        }
        let needle = keyword.to_lowercase();

        if text::contains_whole_word(&lower, &needle) {
            tracing::debug!(keyword, "target found as whole word");
            push_keyword(
                &mut keywords,
                &mut seen_keywords,
                KeywordEntry::new(keyword, TARGET_RELEVANCE, 1),
            );
            if priority.matches(&needle) {
                push_entity(
                    &mut entities,
                    &mut seen_entities,
                    Entity {
                        text: keyword.to_string(),
                        entity_type: priority.entity_type().to_string(),
                        relevance: TARGET_RELEVANCE,
                        confidence: TARGET_ENTITY_CONFIDENCE,
                        count: 1,
                    },
                );
            }
        } else if lower.contains(&needle) {
            tracing::debug!(keyword, "target found inside a longer word");
            push_keyword(
                &mut keywords,
                &mut seen_keywords,
                KeywordEntry::new(format!("{keyword}{PARTIAL_SUFFIX}"), PARTIAL_RELEVANCE, 1),
            );
        } else {
            tracing::debug!(keyword, "target absent from content");
        }
    }

    let tokens = text::phrase_tokens(content);
    for phrase in phrases::phrase_windows(&tokens, MAX_PHRASE_TOKENS) {
        if phrase.text.chars().count() < MIN_PHRASE_CHARS {
            continue;
        }
        if priority.matches(&phrase.text) {
            push_entity(
                &mut entities,
                &mut seen_entities,
                Entity {
                    text: phrase.text.clone(),
                    entity_type: priority.entity_type().to_string(),
                    relevance: BONUS_ENTITY_RELEVANCE,
                    confidence: BONUS_ENTITY_CONFIDENCE,
                    count: 1,
                },
            );
        }
        let relevance = round2(PHRASE_BASE_RELEVANCE - PHRASE_LENGTH_PENALTY * phrase.len as f64);
        push_keyword(
            &mut keywords,
            &mut seen_keywords,
            KeywordEntry::new(phrase.text, relevance, 1),
        );
    }

    keywords.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    keywords.truncate(max_keywords.min(DEFAULT_MAX_KEYWORDS));

    if let Some(existing) = &source.entities {
        entities.extend(existing.iter().cloned());
    }

    tracing::info!(
        keywords = keywords.len(),
        entities = entities.len(),
        "edited content re-analyzed"
    );

    AnalysisResult {
        optimized_text: content.to_string(),
        keywords: Some(keywords),
        entities: Some(entities),
        ..source.clone()
    }
}

/// Append unless an entry with the same case-insensitive text exists.
fn push_keyword(list: &mut Vec<KeywordEntry>, seen: &mut HashSet<String>, entry: KeywordEntry) {
    if seen.insert(entry.text.to_lowercase()) {
        list.push(entry);
    }
}

fn push_entity(list: &mut Vec<Entity>, seen: &mut HashSet<String>, entity: Entity) {
    if seen.insert(entity.text.to_lowercase()) {
        list.push(entity);
    }
}
