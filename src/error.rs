//! Error types for configuration and message parsing

use thiserror::Error;

/// Errors raised outside the best-effort extraction core
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse a raw message structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Configuration document could not be deserialized
    #[error("Failed to read configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is out of range
    #[error("Invalid configuration value for {field}: {details}")]
    InvalidConfig { field: String, details: String },

    /// A vocabulary word could not be turned into a matcher
    #[error("Invalid vocabulary word {word:?}: {details}")]
    Vocabulary { word: String, details: String },

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fallible operations
pub type Result<T> = std::result::Result<T, ParseError>;
