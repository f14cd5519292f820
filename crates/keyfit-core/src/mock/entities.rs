//! Entity extraction for raw-text analysis.
//!
//! Two sources of entities:
//!
//! - Product phrases: a token containing a priority token, alone and with
//!   the significant word before it, typed with the configured entity type.
//! - Organizations: runs of capitalized words. A lone capitalized word at
//!   the start of a sentence is ignored.

use std::collections::HashMap;

use crate::model::Entity;
use crate::priority::PriorityTokens;
use crate::text::{ends_sentence, is_significant, strip_punctuation};
use crate::word_lists::STOP_WORDS;

/// Entity type assigned to capitalized runs.
pub const ORGANIZATION_TYPE: &str = "Organization";

const PRODUCT_RELEVANCE: f64 = 0.7;
const PRODUCT_CONFIDENCE: f64 = 0.8;
const ORGANIZATION_RELEVANCE: f64 = 0.6;
const ORGANIZATION_CONFIDENCE: f64 = 0.6;

/// Extract product and organization entities, product phrases first.
///
/// `prose` supplies capitalization and sentence boundaries; `tokens` are its
/// phrase tokens. Entities are deduplicated case-insensitively and counted
/// by occurrence.
pub fn extract_entities(
    prose: &str,
    tokens: &[String],
    priority: &PriorityTokens,
    limit: usize,
) -> Vec<Entity> {
    let mut tally = Tally::default();
    let product = (PRODUCT_RELEVANCE, PRODUCT_CONFIDENCE);

    for (i, token) in tokens.iter().enumerate() {
        if !priority.matches(token) {
            continue;
        }
        if let Some(prev) = i.checked_sub(1).and_then(|p| tokens.get(p))
            && is_significant(prev)
        {
            tally.bump(format!("{prev} {token}"), priority.entity_type(), product);
        }
        tally.bump(token.clone(), priority.entity_type(), product);
    }

    for run in capitalized_runs(prose) {
        tally.bump(
            run,
            ORGANIZATION_TYPE,
            (ORGANIZATION_RELEVANCE, ORGANIZATION_CONFIDENCE),
        );
    }

    let mut entities = tally.entities;
    entities.truncate(limit);
    tracing::debug!(count = entities.len(), "entities extracted");
    entities
}

/// Entities in first-seen order, keyed case-insensitively.
#[derive(Default)]
struct Tally {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn bump(&mut self, text: String, entity_type: &str, (relevance, confidence): (f64, f64)) {
        let key = text.to_lowercase();
        if let Some(&i) = self.index.get(&key) {
            self.entities[i].count += 1;
            return;
        }
        self.index.insert(key, self.entities.len());
        self.entities.push(Entity {
            text,
            entity_type: entity_type.to_string(),
            relevance,
            confidence,
            count: 1,
        });
    }
}

/// Runs of capitalized words, in order of appearance (with repeats).
///
/// A run ends at a word that is not capitalized, or after a word carrying
/// trailing punctuation.
fn capitalized_runs(prose: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut run_starts_sentence = false;
    let mut at_sentence_start = true;

    for raw in prose.split_whitespace() {
        let word = strip_punctuation(raw);
        if is_capitalized_word(word) {
            if current.is_empty() {
                run_starts_sentence = at_sentence_start;
            }
            current.push(word);
            if raw.ends_with(|c: char| !c.is_alphanumeric()) {
                flush_run(&mut runs, &mut current, run_starts_sentence);
            }
        } else {
            flush_run(&mut runs, &mut current, run_starts_sentence);
        }
        at_sentence_start = ends_sentence(raw);
    }
    flush_run(&mut runs, &mut current, run_starts_sentence);
    runs
}

fn flush_run(runs: &mut Vec<String>, current: &mut Vec<&str>, starts_sentence: bool) {
    if !(current.is_empty() || (current.len() == 1 && starts_sentence)) {
        runs.push(current.join(" "));
    }
    current.clear();
}

fn is_capitalized_word(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().next().is_some_and(char::is_uppercase)
        && !STOP_WORDS.contains(word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::phrase_tokens;

    const COPY: &str = "Shop wireless bras from Acme Outdoor. Acme Outdoor bras offer \
                        support and comfort. Comfort matters, and support matters.";

    fn extract(prose: &str) -> Vec<Entity> {
        extract_entities(prose, &phrase_tokens(prose), PriorityTokens::builtin(), 50)
    }

    fn texts(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn product_phrases_come_first() {
        let entities = extract(COPY);
        assert_eq!(
            texts(&entities),
            vec!["wireless bras", "bras", "outdoor bras", "Acme Outdoor"]
        );
    }

    #[test]
    fn product_entities_are_typed_and_counted() {
        let entities = extract(COPY);
        let bras = entities.iter().find(|e| e.text == "bras").unwrap();
        assert_eq!(bras.entity_type, "ProductType");
        assert_eq!(bras.count, 2);
        assert!((bras.relevance - 0.7).abs() < f64::EPSILON);
        assert!((bras.confidence - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn organizations_are_capitalized_runs() {
        let entities = extract(COPY);
        let acme = entities.iter().find(|e| e.text == "Acme Outdoor").unwrap();
        assert_eq!(acme.entity_type, ORGANIZATION_TYPE);
        assert_eq!(acme.count, 2);
        assert!((acme.relevance - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn lone_sentence_initial_word_is_not_an_organization() {
        let entities = extract("Comfort matters. Support matters too.");
        assert!(entities.is_empty(), "{:?}", texts(&entities));
    }

    #[test]
    fn lone_capitalized_word_mid_sentence_is_an_organization() {
        let entities = extract("We partner with Globex on shipping.");
        assert_eq!(texts(&entities), vec!["Globex"]);
    }

    #[test]
    fn product_phrase_skips_stop_word_prefix() {
        let entities = extract("made for bras");
        assert_eq!(texts(&entities), vec!["bras"]);
    }

    #[test]
    fn custom_priority_tokens() {
        let priority = PriorityTokens::new(&["sock"], "Hosiery").unwrap();
        let prose = "Merino socks keep feet warm";
        let entities = extract_entities(prose, &phrase_tokens(prose), &priority, 10);
        assert_eq!(texts(&entities), vec!["merino socks", "socks"]);
        assert_eq!(entities[0].entity_type, "Hosiery");
    }

    #[test]
    fn limit_is_applied() {
        let entities = extract_entities(COPY, &phrase_tokens(COPY), PriorityTokens::builtin(), 2);
        assert_eq!(texts(&entities), vec!["wireless bras", "bras"]);
    }
}
