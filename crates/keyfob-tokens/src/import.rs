//! JSON import of a token list, merged into an existing book.
//!
//! The whole file is validated before anything is merged: one bad token
//! rejects the import. Tokens naming an existing `(issuer, label)` account
//! replace it in place; all others are appended in file order.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::book::TokenBook;
use crate::error::TokenError;
use crate::token::Token;

/// Outcome of a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Tokens appended as new accounts.
    pub added: usize,
    /// Existing accounts whose token was replaced.
    pub updated: usize,
}

/// Token as found in an import file; every field may be missing or null.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct RawToken {
    #[serde(default)]
    issuer: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    secret: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    selector: Option<String>,
}

/// Take a required field, rejecting absent and empty values.
fn required(field: &mut Option<String>, name: &str, index: usize) -> Result<String, TokenError> {
    field
        .take()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| TokenError::InvalidToken {
            index,
            reason: format!("missing {name}"),
        })
}

/// Parse and validate an import file into tokens.
///
/// # Errors
///
/// - [`TokenError::InvalidFormat`] if the input is not a JSON array.
/// - [`TokenError::InvalidToken`] if any element is not an object with
///   non-empty `issuer`, `label` and `secret` strings.
pub fn parse_tokens(json: &str) -> Result<Vec<Token>, TokenError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| TokenError::InvalidFormat(e.to_string()))?;
    let serde_json::Value::Array(items) = value else {
        return Err(TokenError::InvalidFormat(
            "expected a JSON array of tokens".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| -> Result<Token, TokenError> {
            let mut raw: RawToken =
                serde_json::from_value(item).map_err(|e| TokenError::InvalidToken {
                    index,
                    reason: e.to_string(),
                })?;
            Ok(Token {
                issuer: required(&mut raw.issuer, "issuer", index)?,
                label: required(&mut raw.label, "label", index)?,
                secret: required(&mut raw.secret, "secret", index)?,
                url: raw.url.take().unwrap_or_default(),
                selector: raw.selector.take().unwrap_or_default(),
            })
        })
        .collect()
}

/// Merge `tokens` into `book`.
pub fn merge(book: &mut TokenBook, tokens: Vec<Token>) -> ImportSummary {
    let mut summary = ImportSummary {
        added: 0,
        updated: 0,
    };
    for token in tokens {
        match book.position_of(&token) {
            Some(index) => {
                book.save(token, Some(index));
                summary.updated = summary.updated.saturating_add(1);
            }
            None => {
                book.save(token, None);
                summary.added = summary.added.saturating_add(1);
            }
        }
    }
    summary
}

/// Validate an import file and merge it into `book`.
///
/// On error the book is left untouched.
///
/// # Errors
/// See [`parse_tokens`].
pub fn import_json(book: &mut TokenBook, json: &str) -> Result<ImportSummary, TokenError> {
    let tokens = parse_tokens(json).inspect_err(|e| tracing::warn!("token import rejected: {e}"))?;
    let summary = merge(book, tokens);
    tracing::info!(
        added = summary.added,
        updated = summary.updated,
        "tokens imported"
    );
    Ok(summary)
}
