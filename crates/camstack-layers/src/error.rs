//! Error types for hint table configuration.
//!
//! Classification itself never fails; only loading or validating a custom
//! hint table can.

use std::io;
use thiserror::Error;

use crate::layer_class::LayerClass;

/// Errors that can occur while loading, validating, or saving a hint table.
#[derive(Error, Debug)]
pub enum HintTableError {
    /// I/O error reading or writing the table file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A content pattern does not compile.
    #[error("Invalid content pattern '{pattern}' for layer {layer}: {source}")]
    InvalidPattern {
        layer: LayerClass,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Hint table file must be .json or .toml: {0}")]
    UnsupportedFormat(String),

    /// The table contains no hints.
    #[error("Hint table is empty")]
    EmptyTable,
}

/// Result type alias for hint table operations.
pub type Result<T> = std::result::Result<T, HintTableError>;
