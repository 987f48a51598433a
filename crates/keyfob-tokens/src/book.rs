//! The ordered, user-managed token list.
//!
//! Order is significant: it is the display order, changed only by
//! [`TokenBook::reorder`]. Secrets are zeroized when the book is dropped.

use keyfob_otp_core::{generate_at, normalize, Clock, OtpCode, OtpError, ProvisioningRecord};
use zeroize::Zeroize;

use crate::autofill;
use crate::error::TokenError;
use crate::store::TokenStore;
use crate::token::Token;

/// Ordered list of tokens.
#[derive(Debug, Default)]
pub struct TokenBook {
    tokens: Vec<Token>,
}

impl TokenBook {
    /// An empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Read the whole list from `store`.
    ///
    /// # Errors
    /// Propagates the store's load error.
    pub fn load(store: &impl TokenStore) -> Result<Self, TokenError> {
        Ok(Self {
            tokens: store.load()?,
        })
    }

    /// Write the whole list to `store`.
    ///
    /// # Errors
    /// Propagates the store's save error.
    pub fn persist(&self, store: &mut impl TokenStore) -> Result<(), TokenError> {
        store.save(&self.tokens)
    }

    /// Tokens in display order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the book holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Add a token, or replace the one at `index` when it is in range.
    ///
    /// An out-of-range or absent `index` appends. The secret is stored in
    /// canonical form (see [`normalize`]), which decodes to the same key.
    /// Returns the position the token ended up at.
    pub fn save(&mut self, mut token: Token, index: Option<usize>) -> usize {
        let canonical = normalize(&token.secret);
        std::mem::replace(&mut token.secret, canonical).zeroize();
        match index {
            Some(i) if i < self.tokens.len() => {
                let mut old = std::mem::replace(&mut self.tokens[i], token);
                old.zeroize();
                i
            }
            _ => {
                self.tokens.push(token);
                self.tokens.len().saturating_sub(1)
            }
        }
    }

    /// Append the account described by a scanned provisioning URI.
    pub fn add_provisioned(&mut self, record: ProvisioningRecord) -> usize {
        self.save(Token::from(record), None)
    }

    /// Remove and return the token at `index`.
    ///
    /// # Errors
    /// Returns [`TokenError::IndexOutOfRange`] if there is no such token.
    pub fn delete(&mut self, index: usize) -> Result<Token, TokenError> {
        self.check_index(index)?;
        Ok(self.tokens.remove(index))
    }

    /// Move the token at `from` so that it ends up at `to`.
    ///
    /// # Errors
    /// Returns [`TokenError::IndexOutOfRange`] if either index is outside the
    /// list; the list is left unchanged.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), TokenError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let moved = self.tokens.remove(from);
        self.tokens.insert(to, moved);
        Ok(())
    }

    /// Position of the token for the same `(issuer, label)` account.
    #[must_use]
    pub fn position_of(&self, token: &Token) -> Option<usize> {
        self.tokens.iter().position(|t| t.same_account(token))
    }

    /// Selector to fill with the code of the token at `index` on `page_url`.
    ///
    /// # Errors
    /// Returns [`TokenError::IndexOutOfRange`] for a bad index, or
    /// [`TokenError::Autofill`] when the token cannot be filled on this page.
    pub fn autofill_target(&self, index: usize, page_url: &str) -> Result<&str, TokenError> {
        self.check_index(index)?;
        Ok(autofill::autofill_target(&self.tokens[index], page_url)?)
    }

    /// Current code for every token, in display order.
    ///
    /// The clock is read once so all codes share the same time step.
    #[must_use]
    pub fn codes(&self, clock: &impl Clock) -> Vec<Result<OtpCode, OtpError>> {
        match clock.unix_seconds() {
            Ok(now) => self
                .tokens
                .iter()
                .map(|t| generate_at(&t.secret, now))
                .collect(),
            Err(e) => vec![Err(e); self.tokens.len()],
        }
    }

    fn check_index(&self, index: usize) -> Result<(), TokenError> {
        if index < self.tokens.len() {
            Ok(())
        } else {
            Err(TokenError::IndexOutOfRange {
                index,
                len: self.tokens.len(),
            })
        }
    }
}

impl From<Vec<Token>> for TokenBook {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl Drop for TokenBook {
    fn drop(&mut self) {
        self.tokens.zeroize();
    }
}
