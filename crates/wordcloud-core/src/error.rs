//! Error types for wordcloud-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors a scoring request can surface to its caller.
///
/// Malformed language data never shows up here; the loader absorbs it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The requested language has no entry in the catalog.
    #[error("Language {name} is not available for processing.")]
    UnknownLanguage {
        /// The language name that was requested.
        name: String,
    },
}

/// Result type alias using [`ScoreError`].
pub type ScoreResult<T> = Result<T, ScoreError>;
