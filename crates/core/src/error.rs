//! Error types for Xournal document conversion.

use thiserror::Error;

/// Primary error type for document parsing and rendering.
///
/// Only fatal conditions are represented here; recoverable conditions
/// (unknown tags, unknown stroke tools) are logged and skipped, and shape
/// detector rejections are plain non-matches that never surface as errors.
#[derive(Error, Debug)]
pub enum XojError {
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid number '{0}'")]
    Number(String),

    #[error("missing attribute '{attr}' on <{tag}>")]
    MissingAttribute { tag: String, attr: String },

    #[error("malformed document: {0}")]
    Syntax(String),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for XojError.
pub type Result<T> = std::result::Result<T, XojError>;

/// Parse a float the way the source format requires: any failure is fatal.
pub(crate) fn parse_float(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| XojError::Number(s.to_string()))
}
