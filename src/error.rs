//! Error types for the search engine.
//!
//! The search pipeline itself is total: malformed query fragments just fail to
//! match. Errors only come out of option validation and option parsing.

use thiserror::Error;

/// Result type alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while configuring a search.
#[derive(Debug, Error)]
pub enum SearchError {
  /// A search option holds a value outside its domain.
  #[error("invalid option `{name}`: {reason}")]
  InvalidOption {
    /// The option name as it appears in JSON (e.g. `fuzzyThreshold`).
    name: &'static str,
    /// Human readable description of the violated constraint.
    reason: String,
  },

  /// Options JSON could not be parsed.
  #[error("malformed search options: {0}")]
  Options(#[from] serde_json::Error),
}
