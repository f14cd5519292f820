//! Core library for keyfit.
//!
//! Checks whether marketing copy covers its target keywords, judged against
//! a text-analytics result, and synthesizes such results locally when no
//! analytics backend is available.
//!
//! # Modules
//!
//! - [`classify`] - Match tiers for target keywords against an analysis
//! - [`mock`] - Deterministic mock analyses of raw or edited text
//! - [`model`] - The analysis result data model
//! - [`config`] - Configuration loading and management
//! - [`rules`] - Path-based target keyword rules
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use keyfit_core::{AnalysisResult, MatchTier, classify, mock_analyze};
//!
//! let edited = mock_analyze(
//!     &AnalysisResult::default(),
//!     "Great support for everyone",
//!     &["support"],
//! );
//! assert_eq!(classify("support", Some(&edited)), MatchTier::Exact);
//! assert_eq!(classify("returns", Some(&edited)), MatchTier::Missing);
//! ```
#![deny(unsafe_code)]

pub mod classify;
pub mod config;
pub mod error;
pub mod markdown;
pub mod matching;
pub mod mock;
pub mod model;
pub mod priority;
pub mod rules;
pub mod text;
pub mod word_lists;

pub use classify::{CoverageReport, KeywordClassifier, KeywordVerdict, MatchTier, classify};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel, Rule};
pub use error::{ConfigError, ConfigResult, MockError, MockResult};
pub use mock::{Feature, Features, Limits, MockAnalyzer, mock_analyze, run_mock_analysis};
pub use model::{AnalysisResult, Category, Concept, Entity, KeywordEntry};
pub use priority::PriorityTokens;
pub use rules::RuleSet;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
