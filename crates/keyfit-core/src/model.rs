//! Analysis result model.
//!
//! Mirrors the response shape of a text-analytics API. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for use in both CLI JSON
//! output and MCP tool responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A synthesized (or previously computed) analysis of a piece of text.
///
/// `keywords` and `entities` are optional so that partial documents can be
/// deserialized; generation always fills both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The text the analysis describes.
    #[serde(default)]
    pub optimized_text: String,
    /// Detected keywords, most relevant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<KeywordEntry>>,
    /// Detected entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,
    /// High-level concepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<Concept>,
    /// Taxonomy categories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
}

impl AnalysisResult {
    /// Keyword entries, or an empty slice when absent.
    pub fn keyword_entries(&self) -> &[KeywordEntry] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// Entities, or an empty slice when absent.
    pub fn entity_entries(&self) -> &[Entity] {
        self.entities.as_deref().unwrap_or_default()
    }
}

/// A detected phrase and its importance in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordEntry {
    /// The phrase.
    pub text: String,
    /// Relevance in `[0, 1]`.
    pub relevance: f64,
    /// Occurrence count.
    #[serde(default)]
    pub count: usize,
}

impl KeywordEntry {
    /// Create an entry.
    pub fn new(text: impl Into<String>, relevance: f64, count: usize) -> Self {
        Self {
            text: text.into(),
            relevance,
            count,
        }
    }
}

/// A typed detection such as a product type or organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    /// The entity text.
    pub text: String,
    /// Entity type (e.g. `ProductType`, `Organization`).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Relevance in `[0, 1]`.
    pub relevance: f64,
    /// Detection confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
    /// Occurrence count.
    #[serde(default)]
    pub count: usize,
}

/// An abstract concept the text relates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Concept {
    /// Concept name.
    pub text: String,
    /// Relevance in `[0, 1]`.
    pub relevance: f64,
}

/// A taxonomy category with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    /// Slash-delimited taxonomy path.
    pub label: String,
    /// Share of category evidence in `[0, 1]`.
    pub score: f64,
}
