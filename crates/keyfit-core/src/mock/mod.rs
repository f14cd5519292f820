//! Mock text analysis.
//!
//! Synthesizes a text-analytics response locally instead of calling a
//! backend. Two paths:
//!
//! - [`MockAnalyzer::analyze_text`] builds a full result from raw text, one
//!   independent feature module per dimension.
//! - [`MockAnalyzer::analyze_edit`] rewrites an existing result for edited
//!   text so the target keywords stay visible (see [`optimize`]).
//!
//! Everything here is deterministic.

pub mod categories;
pub mod concepts;
pub mod entities;
pub mod keywords;
pub mod optimize;
pub mod phrases;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{MockError, MockResult};
use crate::markdown;
use crate::model::AnalysisResult;
use crate::priority::PriorityTokens;
use crate::text;

pub use optimize::DEFAULT_MAX_KEYWORDS;

/// All available feature names.
pub const ALL_FEATURES: &[&str] = &["keywords", "entities", "concepts", "categories"];

/// An analytic dimension of a mock analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Feature {
    /// Ranked keyword phrases.
    Keywords,
    /// Typed entities.
    Entities,
    /// Recurring concepts.
    Concepts,
    /// Taxonomy categories.
    Categories,
}

impl Feature {
    /// Returns the feature as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::Entities => "entities",
            Self::Concepts => "concepts",
            Self::Categories => "categories",
        }
    }

    /// Parse a feature name (case-insensitive, surrounding whitespace ignored).
    pub fn from_name(name: &str) -> MockResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "keywords" => Ok(Self::Keywords),
            "entities" => Ok(Self::Entities),
            "concepts" => Ok(Self::Concepts),
            "categories" => Ok(Self::Categories),
            _ => Err(MockError::UnknownFeature {
                name: name.to_string(),
                available: ALL_FEATURES.join(", "),
            }),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum entries per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Limits {
    /// Maximum keyword entries.
    pub keywords: usize,
    /// Maximum entities.
    pub entities: usize,
    /// Maximum concepts.
    pub concepts: usize,
    /// Maximum categories.
    pub categories: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            keywords: 10,
            entities: 10,
            concepts: 5,
            categories: 3,
        }
    }
}

/// Which dimensions to compute, and how many entries each may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Features {
    /// Compute keywords.
    pub keywords: bool,
    /// Compute entities.
    pub entities: bool,
    /// Compute concepts.
    pub concepts: bool,
    /// Compute categories.
    pub categories: bool,
    /// Per-dimension limits.
    pub limits: Limits,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            keywords: true,
            entities: true,
            concepts: true,
            categories: true,
            limits: Limits::default(),
        }
    }
}

impl Features {
    /// Enable exactly the listed features, keeping `self`'s limits.
    pub fn only(self, features: &[Feature]) -> Self {
        Self {
            keywords: features.contains(&Feature::Keywords),
            entities: features.contains(&Feature::Entities),
            concepts: features.contains(&Feature::Concepts),
            categories: features.contains(&Feature::Categories),
            limits: self.limits,
        }
    }

    /// Enable exactly the named features.
    ///
    /// Fails on the first name not in [`ALL_FEATURES`].
    pub fn select<S: AsRef<str>>(self, names: &[S]) -> MockResult<Self> {
        let parsed = names
            .iter()
            .map(|n| Feature::from_name(n.as_ref()))
            .collect::<MockResult<Vec<_>>>()?;
        Ok(self.only(&parsed))
    }

    /// Whether `feature` is enabled.
    pub const fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Keywords => self.keywords,
            Feature::Entities => self.entities,
            Feature::Concepts => self.concepts,
            Feature::Categories => self.categories,
        }
    }

    /// Names of the enabled features, in canonical order.
    pub fn enabled(&self) -> Vec<Feature> {
        [
            Feature::Keywords,
            Feature::Entities,
            Feature::Concepts,
            Feature::Categories,
        ]
        .into_iter()
        .filter(|f| self.is_enabled(*f))
        .collect()
    }
}

/// Mock generator configured with priority tokens and a keyword cap.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    priority: PriorityTokens,
    max_keywords: usize,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(PriorityTokens::default(), DEFAULT_MAX_KEYWORDS)
    }
}

impl MockAnalyzer {
    /// Create an analyzer.
    ///
    /// `max_keywords` caps the keyword list of [`Self::analyze_edit`]; values
    /// above [`DEFAULT_MAX_KEYWORDS`] are clamped to it.
    pub const fn new(priority: PriorityTokens, max_keywords: usize) -> Self {
        let max_keywords = if max_keywords > DEFAULT_MAX_KEYWORDS {
            DEFAULT_MAX_KEYWORDS
        } else {
            max_keywords
        };
        Self {
            priority,
            max_keywords,
        }
    }

    /// The effective keyword cap.
    pub const fn max_keywords(&self) -> usize {
        self.max_keywords
    }

    /// The priority tokens in use.
    pub const fn priority(&self) -> &PriorityTokens {
        &self.priority
    }

    /// Build a mock analysis of raw text.
    ///
    /// # Arguments
    ///
    /// * `input` - The text to analyze.
    /// * `strip_md` - If `true`, strip markdown formatting first.
    /// * `features` - Dimensions to compute and their limits.
    #[tracing::instrument(skip(self, input), fields(text_len = input.len(), strip_md))]
    pub fn analyze_text(
        &self,
        input: &str,
        strip_md: bool,
        features: &Features,
    ) -> MockResult<AnalysisResult> {
        let prose = if strip_md {
            markdown::strip_to_prose(input)
        } else {
            input.to_string()
        };
        let prose = prose.trim();
        if prose.is_empty() {
            return Err(MockError::EmptyInput);
        }

        let tokens = text::phrase_tokens(prose);
        let limits = &features.limits;

        let keywords = if features.keywords {
            keywords::extract_keywords(prose, limits.keywords)
        } else {
            Vec::new()
        };

        let entities = if features.entities {
            entities::extract_entities(prose, &tokens, &self.priority, limits.entities)
        } else {
            Vec::new()
        };

        let concepts = if features.concepts {
            concepts::extract_concepts(&tokens, limits.concepts)
        } else {
            Vec::new()
        };

        let categories = if features.categories {
            categories::classify_categories(&tokens, limits.categories)
        } else {
            Vec::new()
        };

        tracing::info!(
            keywords = keywords.len(),
            entities = entities.len(),
            concepts = concepts.len(),
            categories = categories.len(),
            "mock analysis generated"
        );

        Ok(AnalysisResult {
            optimized_text: prose.to_string(),
            keywords: Some(keywords),
            entities: Some(entities),
            concepts,
            categories,
        })
    }

    /// Re-analyze edited content so the target keywords stay visible.
    ///
    /// Never fails; see [`optimize::optimize_keywords`].
    pub fn analyze_edit<S: AsRef<str>>(
        &self,
        source: &AnalysisResult,
        optimized_content: &str,
        target_keywords: &[S],
    ) -> AnalysisResult {
        optimize::optimize_keywords(
            source,
            optimized_content,
            target_keywords,
            &self.priority,
            self.max_keywords,
        )
    }
}

/// Build a mock analysis of raw text with the built-in priority tokens.
pub fn run_mock_analysis(
    input: &str,
    strip_md: bool,
    features: &Features,
) -> MockResult<AnalysisResult> {
    MockAnalyzer::default().analyze_text(input, strip_md, features)
}

/// Re-analyze edited content with the built-in priority tokens and a
/// 15-entry keyword cap.
pub fn mock_analyze<S: AsRef<str>>(
    source: &AnalysisResult,
    optimized_content: &str,
    target_keywords: &[S],
) -> AnalysisResult {
    MockAnalyzer::default().analyze_edit(source, optimized_content, target_keywords)
}
