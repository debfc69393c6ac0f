//! Error types for the DOM query oracles

use thiserror::Error;

/// Query oracle error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Expression is empty or whitespace-only
    #[error("empty query expression")]
    EmptyExpression,

    /// XPath expression outside the supported subset, or malformed
    #[error("unsupported XPath expression: {0}")]
    UnsupportedXPath(String),

    /// CSS selector outside the supported subset, or malformed
    #[error("unsupported CSS selector: {0}")]
    UnsupportedSelector(String),
}
