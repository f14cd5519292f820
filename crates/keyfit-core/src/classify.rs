//! Keyword match classification.
//!
//! Decides how confidently a target keyword is present in an analysis
//! result. Rules are evaluated in order and the first that fires wins:
//!
//! 1. Priority-token keywords found as whole words in the text → exact
//! 2. Exact keyword-list match → exact
//! 3. Stem-level partial keyword-list match → partial
//! 4. Substring containment either way in the keyword list → partial
//! 5. Relevant to one of the top-ranked keywords → relevant
//! 6. Substring containment either way in the entity list → exact
//! 7. Otherwise → missing
//!
//! Rule 6 grades entity containment higher than rule 4 grades keyword
//! containment. Entities are treated as stronger corroboration.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::matching::{self, DEFAULT_TOP_POSITIONS};
use crate::model::AnalysisResult;
use crate::priority::PriorityTokens;
use crate::text::{self, normalize};

/// How confidently a keyword is present. Listed from most to least confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Present verbatim.
    Exact,
    /// Present in a related form.
    Partial,
    /// Topically related to a leading keyword.
    Relevant,
    /// Not detected.
    Missing,
}

impl MatchTier {
    /// All tiers in display order.
    pub const ALL: [Self; 4] = [Self::Exact, Self::Partial, Self::Relevant, Self::Missing];

    /// Returns the tier as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
            Self::Relevant => "relevant",
            Self::Missing => "missing",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier configured with priority tokens and a top-position window.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    priority: PriorityTokens,
    top_positions: usize,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(PriorityTokens::default(), DEFAULT_TOP_POSITIONS)
    }
}

impl KeywordClassifier {
    /// Create a classifier.
    pub const fn new(priority: PriorityTokens, top_positions: usize) -> Self {
        Self {
            priority,
            top_positions,
        }
    }

    /// The priority tokens in use.
    pub const fn priority(&self) -> &PriorityTokens {
        &self.priority
    }

    /// Size of the top-ranked window for the relevant tier.
    pub const fn top_positions(&self) -> usize {
        self.top_positions
    }

    /// Classify `keyword` against `result`.
    ///
    /// An absent result, an absent keyword list, or a blank keyword yields
    /// [`MatchTier::Missing`]. Never fails.
    pub fn classify(&self, keyword: &str, result: Option<&AnalysisResult>) -> MatchTier {
        let Some(result) = result else {
            return MatchTier::Missing;
        };
        let Some(keywords) = result.keywords.as_deref() else {
            return MatchTier::Missing;
        };
        let needle = normalize(keyword);
        if needle.is_empty() {
            return MatchTier::Missing;
        }

        if self.priority.matches(&needle)
            && text::contains_whole_word(&result.optimized_text, &needle)
        {
            tracing::debug!(keyword, rule = "priority_text", "classified exact");
            return MatchTier::Exact;
        }

        if keywords
            .iter()
            .any(|k| matching::is_exact_match(&needle, &k.text))
        {
            tracing::debug!(keyword, rule = "exact", "classified exact");
            return MatchTier::Exact;
        }

        if keywords
            .iter()
            .any(|k| matching::is_partial_match(&needle, &k.text))
        {
            tracing::debug!(keyword, rule = "partial", "classified partial");
            return MatchTier::Partial;
        }

        if keywords.iter().any(|k| contains_either_way(&k.text, &needle)) {
            tracing::debug!(keyword, rule = "keyword_substring", "classified partial");
            return MatchTier::Partial;
        }

        if matching::is_in_top_positions(&needle, keywords, self.top_positions) {
            tracing::debug!(keyword, rule = "top_positions", "classified relevant");
            return MatchTier::Relevant;
        }

        if result
            .entity_entries()
            .iter()
            .any(|e| contains_either_way(&e.text, &needle))
        {
            tracing::debug!(keyword, rule = "entity_substring", "classified exact");
            return MatchTier::Exact;
        }

        tracing::debug!(keyword, "classified missing");
        MatchTier::Missing
    }

    /// Classify every target keyword for display.
    ///
    /// Blank targets are skipped and duplicates (after normalization) are
    /// reported once, in first-seen order.
    #[tracing::instrument(skip_all, fields(targets = targets.len()))]
    pub fn coverage<S: AsRef<str>>(
        &self,
        targets: &[S],
        result: Option<&AnalysisResult>,
    ) -> CoverageReport {
        let mut seen = HashSet::new();
        let verdicts: Vec<KeywordVerdict> = targets
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .map(|t| KeywordVerdict {
                keyword: t.to_string(),
                tier: self.classify(t, result),
            })
            .collect();

        let count = |tier: MatchTier| verdicts.iter().filter(|v| v.tier == tier).count();
        let report = CoverageReport {
            exact: count(MatchTier::Exact),
            partial: count(MatchTier::Partial),
            relevant: count(MatchTier::Relevant),
            missing: count(MatchTier::Missing),
            keywords: verdicts,
        };
        tracing::info!(
            exact = report.exact,
            partial = report.partial,
            relevant = report.relevant,
            missing = report.missing,
            "keyword coverage computed"
        );
        report
    }
}

/// Classify `keyword` with the built-in priority tokens and top-10 window.
pub fn classify(keyword: &str, result: Option<&AnalysisResult>) -> MatchTier {
    KeywordClassifier::default().classify(keyword, result)
}

/// Per-keyword classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordVerdict {
    /// The target keyword as given (trimmed).
    pub keyword: String,
    /// Its match tier.
    pub tier: MatchTier,
}

/// Classification of a set of target keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CoverageReport {
    /// Verdicts in target order.
    pub keywords: Vec<KeywordVerdict>,
    /// Number of exact verdicts.
    pub exact: usize,
    /// Number of partial verdicts.
    pub partial: usize,
    /// Number of relevant verdicts.
    pub relevant: usize,
    /// Number of missing verdicts.
    pub missing: usize,
}

impl CoverageReport {
    /// Keywords with a [`MatchTier::Missing`] verdict.
    pub fn missing_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .filter(|v| v.tier == MatchTier::Missing)
            .map(|v| v.keyword.as_str())
    }
}

fn contains_either_way(candidate: &str, needle: &str) -> bool {
    let candidate = normalize(candidate);
    !candidate.is_empty() && (candidate.contains(needle) || needle.contains(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, KeywordEntry};

    fn result_with(text: &str, keywords: &[(&str, f64)]) -> AnalysisResult {
        AnalysisResult {
            optimized_text: text.to_string(),
            keywords: Some(
                keywords
                    .iter()
                    .map(|(k, r)| KeywordEntry::new(*k, *r, 1))
                    .collect(),
            ),
            entities: Some(Vec::new()),
            ..Default::default()
        }
    }

    fn entity(text: &str) -> Entity {
        Entity {
            text: text.to_string(),
            entity_type: "Organization".to_string(),
            relevance: 0.5,
            confidence: 0.5,
            count: 1,
        }
    }

    #[test]
    fn absent_result_is_missing() {
        assert_eq!(classify("support", None), MatchTier::Missing);
    }

    #[test]
    fn absent_keyword_list_is_missing_for_any_keyword() {
        let result = AnalysisResult {
            optimized_text: "Shop wireless bras and support".to_string(),
            keywords: None,
            entities: Some(vec![entity("support")]),
            ..Default::default()
        };
        for kw in ["support", "wireless bras", "", "anything"] {
            assert_eq!(classify(kw, Some(&result)), MatchTier::Missing, "{kw}");
        }
    }

    #[test]
    fn blank_keyword_is_missing() {
        let result = result_with("text", &[("text", 0.9)]);
        assert_eq!(classify("   ", Some(&result)), MatchTier::Missing);
    }

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        let result = result_with("", &[("Great Support", 0.9)]);
        assert_eq!(classify("  great support ", Some(&result)), MatchTier::Exact);
    }

    #[test]
    fn priority_bypass_with_empty_keyword_list() {
        let result = result_with("Our new wireless bras are here.", &[]);
        assert_eq!(classify("wireless bras", Some(&result)), MatchTier::Exact);
        assert_eq!(classify("Wireless Bras", Some(&result)), MatchTier::Exact);
    }

    #[test]
    fn priority_bypass_requires_whole_word() {
        let result = result_with("Our new wireless brassieres are here.", &[]);
        assert_eq!(classify("wireless bras", Some(&result)), MatchTier::Missing);
    }

    #[test]
    fn non_priority_keyword_needs_keyword_list() {
        let result = result_with("Great support for everyone", &[]);
        assert_eq!(classify("support", Some(&result)), MatchTier::Missing);
    }

    #[test]
    fn custom_priority_tokens() {
        let classifier = KeywordClassifier::new(
            PriorityTokens::new(&["sneaker"], "ProductType").unwrap(),
            DEFAULT_TOP_POSITIONS,
        );
        let result = result_with("Lightweight trail sneakers for runners", &[]);
        assert_eq!(
            classifier.classify("trail sneakers", Some(&result)),
            MatchTier::Exact
        );
        // The built-in token no longer applies.
        let bras = result_with("wireless bras", &[]);
        assert_eq!(
            classifier.classify("wireless bras", Some(&bras)),
            MatchTier::Missing
        );
    }

    #[test]
    fn stem_match_is_partial() {
        let result = result_with("", &[("comfort", 0.8)]);
        assert_eq!(classify("comfortable", Some(&result)), MatchTier::Partial);
    }

    #[test]
    fn substring_containment_is_partial() {
        // "supportive" does not stem to "support".
        let result = result_with("", &[("supportive", 0.8)]);
        assert_eq!(classify("support", Some(&result)), MatchTier::Partial);

        let reverse = result_with("", &[("soft", 0.8)]);
        assert_eq!(classify("ultrasoft", Some(&reverse)), MatchTier::Partial);
    }

    #[test]
    fn top_position_relevance() {
        let result = result_with("", &[("optimal results", 0.9)]);
        assert_eq!(classify("optimizing", Some(&result)), MatchTier::Relevant);
    }

    #[test]
    fn relevance_outside_top_ten_is_missing() {
        let mut keywords: Vec<(String, f64)> =
            (0..10).map(|i| (format!("filler{i}"), 0.9)).collect();
        keywords.push(("optimal results".to_string(), 0.1));
        let refs: Vec<(&str, f64)> = keywords.iter().map(|(k, r)| (k.as_str(), *r)).collect();
        let result = result_with("", &refs);
        assert_eq!(classify("optimizing", Some(&result)), MatchTier::Missing);
    }

    #[test]
    fn entity_containment_is_exact() {
        let mut result = result_with("", &[("unrelated", 0.5)]);
        result.entities = Some(vec![entity("Acme Outdoor Gear")]);
        assert_eq!(classify("acme outdoor", Some(&result)), MatchTier::Exact);
    }

    #[test]
    fn keyword_rules_win_over_entities() {
        let mut result = result_with("", &[("supportive", 0.8)]);
        result.entities = Some(vec![entity("support")]);
        assert_eq!(classify("support", Some(&result)), MatchTier::Partial);
    }

    #[test]
    fn absent_entities_fall_through_to_missing() {
        let mut result = result_with("", &[("unrelated", 0.5)]);
        result.entities = None;
        assert_eq!(classify("acme", Some(&result)), MatchTier::Missing);
    }

    #[test]
    fn coverage_counts_tiers_and_dedupes() {
        let result = result_with(
            "Shop wireless bras with great support",
            &[("great support", 0.9), ("comfort", 0.7)],
        );
        let report = KeywordClassifier::default().coverage(
            &["wireless bras", "Great Support", "great support", "comfortable", "", "zebra"],
            Some(&result),
        );
        let tiers: Vec<(&str, MatchTier)> = report
            .keywords
            .iter()
            .map(|v| (v.keyword.as_str(), v.tier))
            .collect();
        assert_eq!(
            tiers,
            vec![
                ("wireless bras", MatchTier::Exact),
                ("Great Support", MatchTier::Exact),
                ("comfortable", MatchTier::Partial),
                ("zebra", MatchTier::Missing),
            ]
        );
        assert_eq!(report.exact, 2);
        assert_eq!(report.partial, 1);
        assert_eq!(report.relevant, 0);
        assert_eq!(report.missing, 1);
        assert_eq!(report.missing_keywords().collect::<Vec<_>>(), vec!["zebra"]);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MatchTier::Relevant).unwrap(), "\"relevant\"");
        assert_eq!(MatchTier::Exact.to_string(), "exact");
    }
}
