//! Error types for `keyfob-otp-core`.

use thiserror::Error;

/// Errors produced while deriving a one-time password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    /// The secret decoded to zero key bytes — there is nothing to key the HMAC with.
    #[error("secret contains no base32 characters")]
    EmptyKey,

    /// The clock reported an instant earlier than the Unix epoch.
    #[error("clock is set before the Unix epoch")]
    ClockBeforeEpoch,
}

/// Reasons a provisioning URI was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    /// Input does not use the `otpauth://` scheme at all.
    #[error("not an otpauth URI")]
    NotOtpAuth,

    /// `otpauth://` URI of a type other than `totp` (e.g. `hotp`).
    #[error("unsupported otpauth type: {0}")]
    UnsupportedType(String),

    /// The URI could not be parsed.
    #[error("malformed URI: {0}")]
    Malformed(String),

    /// The `secret` query parameter is absent or empty.
    #[error("missing secret parameter")]
    MissingSecret,
}
