//! Error types for learning map extraction

use thiserror::Error;

/// Errors that can occur while turning HTML into a learning map
#[derive(Debug, Error)]
pub enum ParseError {
    /// Text that continues an item value arrived before any `key:` was seen in that item.
    #[error("continuation text {text:?} appeared in a list before any `key: value` entry")]
    ContinuationWithoutKey { text: String },

    /// The YAML layer failed in either direction.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;
