//! Error handling for camstack
//!
//! Provides the error types surfaced while turning CAM files into parsed
//! objects:
//! - Format errors (no loader recognizes the data)
//! - Parse errors (a loader recognized the data but could not read it)
//! - I/O errors (the file could not be read)
//!
//! Classification never fails; ambiguity there degrades to an `unknown` tag.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or loading a CAM file.
#[derive(Error, Debug)]
pub enum CamError {
    /// None of the RS-274X, Excellon, or IPC-D-356 loaders accepts the data.
    #[error("Unable to detect file format{}", source_suffix(.filename))]
    FormatUnrecognized {
        /// The name of the data source, when known.
        filename: Option<String>,
    },

    /// A loader recognized the format but could not read the data.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error while reading the source file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CamError {
    /// Create a format error for the given source name.
    pub fn format_unrecognized(filename: Option<&str>) -> Self {
        Self::FormatUnrecognized {
            filename: filename.map(str::to_string),
        }
    }

    /// Returns true when the error means "not a CAM file" rather than a
    /// broken one.
    pub fn is_format_unrecognized(&self) -> bool {
        matches!(self, Self::FormatUnrecognized { .. })
    }
}

fn source_suffix(filename: &Option<String>) -> String {
    match filename {
        Some(name) => format!(" of '{}'", name),
        None => String::new(),
    }
}

/// Errors raised by the per-format loaders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The Gerber document could not be interpreted.
    #[error("Gerber parse error: {0}")]
    Gerber(String),

    /// A line of an Excellon drill file is malformed.
    #[error("Excellon parse error at line {line}: {reason}")]
    Excellon {
        /// The 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// A record of an IPC-D-356 netlist is malformed.
    #[error("IPC-D-356 parse error at line {line}: {reason}")]
    Netlist {
        /// The 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}

/// Result type alias for CAM loading operations.
pub type Result<T> = std::result::Result<T, CamError>;
