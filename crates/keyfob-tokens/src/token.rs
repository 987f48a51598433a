//! The stored token record.

use std::fmt;

use keyfob_otp_core::ProvisioningRecord;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// One authenticator account as kept in the token list.
///
/// Serialized with the field names `issuer`, `label`, `secret`, `url`,
/// `selector`; `url` and `selector` are empty strings when unset.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Zeroize)]
pub struct Token {
    /// Service name (e.g. "GitHub").
    pub issuer: String,
    /// Account name (e.g. "alice@example.com").
    pub label: String,
    /// Base32 shared secret.
    pub secret: String,
    /// Page URL fragment where the code may be auto-filled.
    #[serde(default)]
    pub url: String,
    /// CSS selector of the OTP input on that page.
    #[serde(default)]
    pub selector: String,
}

impl Token {
    /// Create a token without auto-fill settings.
    #[must_use]
    pub fn new(issuer: impl Into<String>, label: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            label: label.into(),
            secret: secret.into(),
            url: String::new(),
            selector: String::new(),
        }
    }

    /// Attach auto-fill settings.
    #[must_use]
    pub fn with_autofill(mut self, url: impl Into<String>, selector: impl Into<String>) -> Self {
        self.url = url.into();
        self.selector = selector.into();
        self
    }

    /// Whether this token and `other` name the same account.
    #[must_use]
    pub fn same_account(&self, other: &Self) -> bool {
        self.issuer == other.issuer && self.label == other.label
    }
}

impl From<ProvisioningRecord> for Token {
    fn from(record: ProvisioningRecord) -> Self {
        Self::new(record.issuer, record.label, record.secret)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("issuer", &self.issuer)
            .field("label", &self.label)
            .field("secret", &"[REDACTED]")
            .field("url", &self.url)
            .field("selector", &self.selector)
            .finish()
    }
}
