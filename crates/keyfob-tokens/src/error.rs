//! Token book error types for `keyfob-tokens`.

use thiserror::Error;

/// Reasons a token cannot be auto-filled into the current page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutofillError {
    /// The token has no URL or no input selector configured.
    #[error("URL and selector are not configured for this token")]
    NotConfigured,

    /// The page URL does not contain the token's configured URL.
    #[error("current page does not match the configured URL: expected {expected}")]
    UrlMismatch {
        /// The URL fragment configured on the token.
        expected: String,
    },
}

/// Errors produced by token book operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// A list position outside the current token list.
    #[error("token index {index} out of range (list has {len} tokens)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of tokens in the list.
        len: usize,
    },

    /// Import input is not a JSON array of tokens.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    /// A token in the import is missing a required field.
    #[error("invalid token at position {index}: {reason}")]
    InvalidToken {
        /// Position in the imported array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Language tag with no available translation.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Auto-fill precondition failed.
    #[error(transparent)]
    Autofill(#[from] AutofillError),

    /// Token file could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
