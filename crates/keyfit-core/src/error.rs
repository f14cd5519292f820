//! Error types for keyfit-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while generating a mock analysis.
///
/// The classifier and the keyword-focused generator never fail; only the
/// raw-text path and its setup can.
#[derive(Error, Debug)]
pub enum MockError {
    /// The input text is empty or has no analyzable content.
    #[error("no analyzable text in input")]
    EmptyInput,

    /// An unknown feature name was provided.
    #[error("unknown feature: {name}. Use: {available}")]
    UnknownFeature {
        /// The feature name that was requested.
        name: String,
        /// Comma-separated list of available feature names.
        available: String,
    },

    /// The priority token automaton could not be built.
    #[error("invalid priority tokens: {0}")]
    PriorityTokens(String),
}

/// Result type alias using [`MockError`].
pub type MockResult<T> = Result<T, MockError>;
