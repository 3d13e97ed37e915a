//! Error types for the expression engine.
//!
//! These surface only from the lower-level APIs (the arithmetic evaluator,
//! decimal operations, asset reads). The top-level [`Rewriter::rewrite`]
//! never returns them; every failure degrades to a textual fallback.
//!
//! [`Rewriter::rewrite`]: crate::rewrite::Rewriter::rewrite

use std::path::PathBuf;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evaluating custom functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Arithmetic expression parsing or evaluation error.
    #[error("Arithmetic error at offset {offset}: {message}")]
    Arithmetic { message: String, offset: usize },

    /// Division by zero in an arithmetic or decimal expression.
    #[error("Division by zero")]
    DivisionByZero,

    /// A decimal literal that cannot be parsed.
    #[error("Invalid decimal literal '{literal}'")]
    InvalidDecimal { literal: String },

    /// File I/O error while inlining an asset.
    #[error("Failed to read asset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an arithmetic error.
    pub fn arithmetic(message: impl Into<String>, offset: usize) -> Self {
        Self::Arithmetic {
            message: message.into(),
            offset,
        }
    }

    /// Create a decimal literal error.
    pub fn invalid_decimal(literal: impl Into<String>) -> Self {
        Self::InvalidDecimal {
            literal: literal.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
