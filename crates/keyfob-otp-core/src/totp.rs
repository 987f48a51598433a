//! RFC 6238 TOTP generation (HMAC-SHA1, 30-second step, 6 digits).
//!
//! Uses `ring::hmac` for HMAC-SHA1. Secrets are decoded with the lenient
//! nibble-aligned base32 decoder in [`crate::base32`].

use std::fmt;

use ring::hmac;

use crate::base32;
use crate::clock::Clock;
use crate::OtpError;

// ── Constants ───────────────────────────────────────────────────────

/// TOTP period in seconds (RFC 6238 §4).
pub const PERIOD: u64 = 30;

/// Number of digits in every code.
pub const DIGITS: usize = 6;

/// Truncation modulus (10^DIGITS).
const MODULUS: u32 = 1_000_000;

/// Remaining seconds at or below which a code counts as about to expire.
pub const EXPIRY_WARNING_SECS: u32 = 10;

/// Text shown in place of a code when generation fails.
///
/// Deliberately non-numeric so it can never pass [`OtpCode::is_code_shape`].
pub const ERROR_SENTINEL: &str = "ERROR";

// ── Types ───────────────────────────────────────────────────────────

/// A 6-digit, zero-padded one-time password.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OtpCode(String);

impl OtpCode {
    /// The code as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `text` has the shape of a code: exactly six ASCII digits.
    #[must_use]
    pub fn is_code_shape(text: &str) -> bool {
        text.len() == DIGITS && text.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Time steps ──────────────────────────────────────────────────────

/// `T = floor(time / PERIOD)` per RFC 6238 §4.
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // PERIOD is non-zero.
pub const fn time_step(unix_seconds: u64) -> u64 {
    unix_seconds / PERIOD
}

/// Seconds until the current code rolls over, in `1..=30`.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub const fn seconds_remaining(unix_seconds: u64) -> u32 {
    // unix_seconds % PERIOD < 30, so the result fits and never underflows.
    (PERIOD - unix_seconds % PERIOD) as u32
}

/// Whether the code shown at `unix_seconds` is about to expire.
#[must_use]
pub const fn is_expiring(unix_seconds: u64) -> bool {
    seconds_remaining(unix_seconds) <= EXPIRY_WARNING_SECS
}

// ── Generation ──────────────────────────────────────────────────────

/// HMAC the counter and apply dynamic truncation (RFC 4226 §5.3).
fn truncate(key: &[u8], counter: u64) -> OtpCode {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key);
    let tag = hmac::sign(&key, &counter.to_be_bytes());
    let digest = tag.as_ref();

    // offset = low-order 4 bits of the last byte; at most 15, so
    // offset + 3 stays inside the 20-byte SHA-1 digest.
    let offset = usize::from(digest[digest.len().wrapping_sub(1)] & 0x0F);
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7F,
        digest[offset.wrapping_add(1)],
        digest[offset.wrapping_add(2)],
        digest[offset.wrapping_add(3)],
    ]);

    #[allow(clippy::arithmetic_side_effects)]
    let code = binary % MODULUS;
    let width = DIGITS;
    OtpCode(format!("{code:0>width$}"))
}

/// Generate the code for `secret` at `unix_seconds`.
///
/// # Errors
/// Returns [`OtpError::EmptyKey`] if the secret has no base32 characters.
pub fn generate_at(secret: &str, unix_seconds: u64) -> Result<OtpCode, OtpError> {
    let key = base32::decode(secret);
    if key.is_empty() {
        return Err(OtpError::EmptyKey);
    }
    Ok(truncate(key.expose(), time_step(unix_seconds)))
}

/// Generate the code for `secret` at the instant reported by `clock`.
///
/// # Errors
/// Returns [`OtpError::EmptyKey`] for a secret with no base32 characters,
/// or [`OtpError::ClockBeforeEpoch`] if the clock predates 1970.
pub fn generate(secret: &str, clock: &impl Clock) -> Result<OtpCode, OtpError> {
    generate_at(secret, clock.unix_seconds()?)
}

/// Generate a code for display, substituting [`ERROR_SENTINEL`] on failure.
///
/// For rendering layers that show text verbatim. The failure is logged.
#[must_use]
pub fn generate_or_sentinel(secret: &str, clock: &impl Clock) -> String {
    match generate(secret, clock) {
        Ok(code) => code.0,
        Err(e) => {
            tracing::error!("failed to generate OTP: {e}");
            ERROR_SENTINEL.to_owned()
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
