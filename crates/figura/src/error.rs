//! Error types for Figura operations.
//!
//! This module provides the main error type [`FiguraError`] which wraps
//! the error conditions that can occur while composing and rendering.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Figura operations.
///
/// # Diagnostic Variants
///
/// The `Description` variant keeps the description source and, when known,
/// the byte span the error points at. This is enough for rich error
/// reporting with the offending TOML highlighted.
#[derive(Debug, Error)]
pub enum FiguraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid description `{name}`: {message}")]
    Description {
        name: String,
        src: String,
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("Color error: {0}")]
    Color(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl FiguraError {
    /// Create a new `Description` error with the associated source text.
    pub fn new_description_error(
        name: impl Into<String>,
        src: impl Into<String>,
        message: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Description {
            name: name.into(),
            src: src.into(),
            message: message.into(),
            span,
        }
    }
}
