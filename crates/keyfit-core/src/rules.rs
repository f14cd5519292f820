//! Path-based target keyword resolution.
//!
//! Matches file paths against configured glob rules and collects the
//! target keywords of every matching rule. Keywords from more specific
//! patterns come first: the pattern with more literal (non-wildcard) path
//! segments ranks higher. Ties keep rule order.

use std::collections::HashSet;

use globset::{Glob, GlobMatcher};

use crate::config::Rule;

/// Compiled rule set for efficient matching.
pub struct RuleSet {
    compiled: Vec<CompiledRule>,
}

/// A single rule with pre-compiled glob matchers.
struct CompiledRule {
    matchers: Vec<(GlobMatcher, usize)>, // (matcher, specificity)
    keywords: Vec<String>,
}

/// Count literal (non-wildcard) path segments in a glob pattern.
///
/// `landing/spring/*.md` → 2 (`landing`, `spring`)
/// `landing/**/*.md` → 1 (`landing`)
/// `**/*.md` → 0
fn specificity(pattern: &str) -> usize {
    pattern
        .split('/')
        .filter(|seg| !seg.contains(['*', '?', '[', '{']))
        .count()
}

impl RuleSet {
    /// Compile a list of rules into a `RuleSet`.
    ///
    /// Invalid glob patterns are skipped with a tracing warning. A rule left
    /// without a valid pattern or without keywords never matches.
    pub fn compile(rules: &[Rule]) -> Self {
        let compiled = rules
            .iter()
            .filter(|rule| !rule.keywords.is_empty())
            .filter_map(|rule| {
                let matchers: Vec<(GlobMatcher, usize)> = rule
                    .paths
                    .iter()
                    .filter_map(|pattern| match Glob::new(pattern) {
                        Ok(glob) => Some((glob.compile_matcher(), specificity(pattern))),
                        Err(e) => {
                            tracing::warn!(pattern, error = %e, "skipping invalid glob pattern");
                            None
                        }
                    })
                    .collect();
                (!matchers.is_empty()).then(|| CompiledRule {
                    matchers,
                    keywords: rule.keywords.clone(),
                })
            })
            .collect();
        Self { compiled }
    }

    /// Whether no usable rule was compiled.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Target keywords for a file path.
    ///
    /// Most specific matching rule first; blank and case-insensitively
    /// repeated keywords are dropped. Empty when nothing matches.
    pub fn resolve(&self, file_path: &str) -> Vec<String> {
        let mut matched: Vec<(usize, &CompiledRule)> = self
            .compiled
            .iter()
            .filter_map(|rule| {
                rule.matchers
                    .iter()
                    .filter(|(m, _)| m.is_match(file_path))
                    .map(|(_, s)| *s)
                    .max()
                    .map(|spec| (spec, rule))
            })
            .collect();
        matched.sort_by(|a, b| b.0.cmp(&a.0));

        let mut seen = HashSet::new();
        let keywords: Vec<String> = matched
            .into_iter()
            .flat_map(|(_, rule)| rule.keywords.iter())
            .map(|k| k.trim())
            .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
            .map(str::to_string)
            .collect();
        tracing::debug!(file_path, count = keywords.len(), "resolved rule keywords");
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rules(specs: &[(&[&str], &[&str])]) -> Vec<Rule> {
        specs
            .iter()
            .map(|(paths, keywords)| Rule {
                paths: paths.iter().map(|s| (*s).to_string()).collect(),
                keywords: keywords.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect()
    }

    #[test]
    fn specificity_counts_literal_segments() {
        assert_eq!(specificity("**/*.md"), 0);
        assert_eq!(specificity("landing/**/*.md"), 1);
        assert_eq!(specificity("landing/spring/*.md"), 2);
        assert_eq!(specificity("landing/{spring,summer}/*.md"), 1);
        assert_eq!(specificity("README.md"), 1);
    }

    #[test]
    fn no_rules_resolve_nothing() {
        let set = RuleSet::compile(&[]);
        assert!(set.is_empty());
        assert!(set.resolve("anything.md").is_empty());
    }

    #[test]
    fn no_match_resolves_nothing() {
        let rules = make_rules(&[(&["landing/**/*.md"], &["comfort"])]);
        let set = RuleSet::compile(&rules);
        assert!(set.resolve("blog/post.md").is_empty());
    }

    #[test]
    fn single_match_returns_keywords() {
        let rules = make_rules(&[(&["landing/**/*.md"], &["wireless bras", "comfort"])]);
        let set = RuleSet::compile(&rules);
        assert_eq!(
            set.resolve("landing/spring/hero.md"),
            vec!["wireless bras", "comfort"]
        );
    }

    #[test]
    fn specific_rule_comes_first() {
        let rules = make_rules(&[
            (&["landing/**/*.md"], &["comfort"]),
            (&["landing/spring/*.md"], &["wireless bras"]),
        ]);
        let set = RuleSet::compile(&rules);
        assert_eq!(
            set.resolve("landing/spring/hero.md"),
            vec!["wireless bras", "comfort"]
        );
    }

    #[test]
    fn equal_specificity_keeps_rule_order() {
        let rules = make_rules(&[(&["blog/*.md"], &["support"]), (&["blog/*.md"], &["comfort"])]);
        let set = RuleSet::compile(&rules);
        assert_eq!(set.resolve("blog/post.md"), vec!["support", "comfort"]);
    }

    #[test]
    fn duplicates_are_dropped_case_insensitively() {
        let rules = make_rules(&[
            (&["blog/*.md"], &["Support", " "]),
            (&["**/*.md"], &["support", "comfort"]),
        ]);
        let set = RuleSet::compile(&rules);
        assert_eq!(set.resolve("blog/post.md"), vec!["Support", "comfort"]);
    }

    #[test]
    fn multiple_paths_in_single_rule() {
        let rules = make_rules(&[(&["README.md", "blog/**/*.md"], &["comfort"])]);
        let set = RuleSet::compile(&rules);
        assert_eq!(set.resolve("README.md"), vec!["comfort"]);
        assert_eq!(set.resolve("blog/2026/post.md"), vec!["comfort"]);
        assert!(set.resolve("src/main.rs").is_empty());
    }

    #[test]
    fn invalid_glob_skipped_gracefully() {
        let rules = make_rules(&[(&["[invalid", "blog/*.md"], &["comfort"])]);
        let set = RuleSet::compile(&rules);
        assert_eq!(set.resolve("blog/post.md"), vec!["comfort"]);
    }

    #[test]
    fn rule_without_keywords_is_ignored() {
        let rules = make_rules(&[(&["blog/*.md"], &[])]);
        assert!(RuleSet::compile(&rules).is_empty());
    }
}
