//! Error types for Almanac operations.
//!
//! This module provides the main error type [`AlmanacError`] which wraps
//! the error conditions that can occur while processing a timeline.

use std::io;

use thiserror::Error;

use almanac_parser::error::ParseError;

/// The main error type for Almanac operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the parser's diagnostics together with the
/// source text they point into, for rich error reporting.
#[derive(Debug, Error)]
pub enum AlmanacError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl AlmanacError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
