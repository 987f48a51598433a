//! `keyfob-otp-core` — one-time password core for KEYFOB.
//!
//! Pure, synchronous building blocks: lenient base32 decoding, TOTP
//! generation (HMAC-SHA1, 30 s, 6 digits) and `otpauth://totp/` parsing.
//! No I/O, no global state; time comes from an injectable [`Clock`].

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod base32;
pub mod clock;
pub mod totp;

pub mod uri;

pub use base32::{decode, normalize, KeyBytes};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{OtpError, UriError};
pub use totp::{
    generate, generate_at, generate_or_sentinel, is_expiring, seconds_remaining, time_step,
    OtpCode, ERROR_SENTINEL, PERIOD,
};
pub use uri::{parse, parse_detailed, ProvisioningRecord};
