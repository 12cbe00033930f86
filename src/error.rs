//! Error types for the text core
//!
//! Only genuinely recoverable failures are errors. An undetected encoding is
//! reported through `DetectionResult::detected`, and delimited-text parsing is
//! total, so neither has a variant here.

use std::time::Duration;

use thiserror::Error;

/// Failure of a find or replace operation.
///
/// Every operation that returns one of these leaves the caller's text or grid
/// untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The pattern is not a valid regular expression.
    #[error("invalid regular expression: {0}")]
    InvalidPattern(String),

    /// Regex evaluation ran past its wall-clock budget.
    #[error("search timed out after {0:?}")]
    Timeout(Duration),
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e.to_string())
    }
}

/// Invalid codec configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("delimiter and quote character must differ (both are {0:?})")]
    DelimiterIsQuote(char),
}
