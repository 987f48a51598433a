//! `otpauth://totp/` provisioning URI parser.
//!
//! Turns the text decoded from an authenticator QR code into the
//! issuer/label/secret triple the token book stores.
//!
//! URI format: `otpauth://totp/[Issuer:]Label?secret=BASE32[&issuer=Issuer]`

use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::UriError;

const OTPAUTH_SCHEME: &str = "otpauth://";
const TOTP_PREFIX: &str = "otpauth://totp/";

/// Placeholder for an issuer or label the URI did not supply.
pub const UNKNOWN: &str = "Unknown";

/// Account metadata and secret extracted from a provisioning URI.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningRecord {
    /// Service name (e.g. "GitHub"), or [`UNKNOWN`].
    pub issuer: String,
    /// Account name (e.g. "alice@example.com"), or [`UNKNOWN`].
    pub label: String,
    /// Base32 secret exactly as it appeared in the URI.
    pub secret: String,
}

impl fmt::Debug for ProvisioningRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisioningRecord")
            .field("issuer", &self.issuer)
            .field("label", &self.label)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Parse a provisioning URI, discarding the rejection reason.
///
/// Returns `None` for anything that is not a `totp` URI with a secret.
#[must_use]
pub fn parse(uri: &str) -> Option<ProvisioningRecord> {
    parse_detailed(uri)
        .inspect_err(|e| tracing::debug!("rejected provisioning URI: {e}"))
        .ok()
}

/// Parse a provisioning URI, reporting why it was rejected.
///
/// # Errors
///
/// - [`UriError::NotOtpAuth`] if the scheme is not `otpauth://`.
/// - [`UriError::UnsupportedType`] for `otpauth://hotp/` and other types.
/// - [`UriError::Malformed`] if a `totp` URI has no path after the type,
///   or the text does not parse as a URI.
/// - [`UriError::MissingSecret`] if `secret` is absent or empty.
pub fn parse_detailed(uri: &str) -> Result<ProvisioningRecord, UriError> {
    if !uri.starts_with(TOTP_PREFIX) {
        return Err(uri.strip_prefix(OTPAUTH_SCHEME).map_or(
            UriError::NotOtpAuth,
            |rest| {
                let kind = rest.split(['/', '?']).next().unwrap_or_default();
                if kind == "totp" {
                    UriError::Malformed("missing path after otpauth://totp".to_owned())
                } else {
                    UriError::UnsupportedType(kind.to_owned())
                }
            },
        ));
    }

    // With the authority fixed to `totp`, only the path or query could fail here.
    let url = Url::parse(uri).map_err(|e| UriError::Malformed(e.to_string()))?;

    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = percent_decode_str(path).decode_utf8_lossy();

    // Split on the first colon only; later colons belong to the label.
    let (path_issuer, label) = path.split_once(':').unwrap_or(("", &*path));

    let query_param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    };

    let secret = query_param("secret").ok_or(UriError::MissingSecret)?;
    let issuer = query_param("issuer").unwrap_or_else(|| path_issuer.to_owned());

    Ok(ProvisioningRecord {
        issuer: or_unknown(issuer),
        label: or_unknown(label.to_owned()),
        secret,
    })
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        UNKNOWN.to_owned()
    } else {
        value
    }
}
