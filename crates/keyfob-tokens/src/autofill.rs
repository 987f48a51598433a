//! Auto-fill precondition checks.
//!
//! Decides whether a token's code may be typed into the page the user is
//! on, and which input it goes into. Injecting the value is the host's job.

use crate::error::AutofillError;
use crate::token::Token;

/// Return the CSS selector to fill on `page_url` for `token`.
///
/// # Errors
///
/// - [`AutofillError::NotConfigured`] if the token lacks a URL or selector.
/// - [`AutofillError::UrlMismatch`] if `page_url` does not contain the
///   token's URL.
pub fn autofill_target<'a>(token: &'a Token, page_url: &str) -> Result<&'a str, AutofillError> {
    if token.url.is_empty() || token.selector.is_empty() {
        return Err(AutofillError::NotConfigured);
    }
    if !page_url.contains(token.url.as_str()) {
        return Err(AutofillError::UrlMismatch {
            expected: token.url.clone(),
        });
    }
    Ok(&token.selector)
}
