#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the TOTP engine and base32 codec.

use keyfob_otp_core::base32::{decode, normalize};
use keyfob_otp_core::totp::{generate_at, time_step, OtpCode, PERIOD};
use keyfob_otp_core::OtpError;
use proptest::prelude::*;

/// Strategy for well-formed base32 secrets.
fn secret_strategy() -> impl Strategy<Value = String> {
    "[A-Z2-7]{1,64}"
}

proptest! {
    /// Same secret and instant always produce the same code.
    #[test]
    fn generation_is_deterministic(secret in secret_strategy(), time in any::<u64>()) {
        let a = generate_at(&secret, time).expect("first generation");
        let b = generate_at(&secret, time).expect("second generation");
        prop_assert_eq!(a, b);
    }

    /// Every instant inside one 30-second window yields the same code.
    #[test]
    fn codes_are_quantized_to_the_time_step(
        secret in secret_strategy(),
        time in 0u64..(u64::MAX / 2),
        offset in 0u64..PERIOD,
    ) {
        let window_start = time_step(time) * PERIOD;
        let at_start = generate_at(&secret, window_start).expect("window start");
        let inside = generate_at(&secret, window_start + offset).expect("inside window");
        prop_assert_eq!(at_start, inside);
    }

    /// Output is six digits, or an error exactly when no key bytes decode.
    #[test]
    fn output_is_six_digits_or_empty_key(secret in ".{0,48}", time in any::<u64>()) {
        match generate_at(&secret, time) {
            Ok(code) => prop_assert!(OtpCode::is_code_shape(code.as_str()), "bad shape: {code}"),
            Err(e) => {
                prop_assert_eq!(e, OtpError::EmptyKey);
                prop_assert!(normalize(&secret).is_empty());
            }
        }
    }

    /// Inserting characters outside the alphabet never changes the key.
    #[test]
    fn invalid_characters_are_transparent(
        secret in secret_strategy(),
        noise in "[ =\\-!@#$%0189]{0,8}",
        at in any::<prop::sample::Index>(),
    ) {
        let split = at.index(secret.len() + 1);
        let noisy = format!("{}{noise}{}", &secret[..split], &secret[split..]);
        prop_assert_eq!(decode(&noisy), decode(&secret));
    }

    /// Case never matters.
    #[test]
    fn decoding_is_case_insensitive(secret in secret_strategy()) {
        prop_assert_eq!(decode(&secret.to_lowercase()), decode(&secret));
    }

    /// Canonicalizing a typed secret never changes the key it decodes to.
    #[test]
    fn normalized_secret_decodes_to_same_key(secret in "\\PC{0,48}") {
        let canonical = normalize(&secret);
        prop_assert_eq!(decode(&canonical), decode(&secret));
        prop_assert_eq!(normalize(&canonical), canonical);
    }

    /// n symbols → ceil(5n/4) nibbles → ceil(nibbles/2) bytes.
    #[test]
    fn decoded_length_follows_nibble_rule(secret in secret_strategy()) {
        let nibbles = (secret.len() * 5).div_ceil(4);
        prop_assert_eq!(decode(&secret).len(), nibbles.div_ceil(2));
    }

    /// Whole 8-symbol groups decode like a textbook byte-aligned decoder.
    #[test]
    fn full_quanta_match_standard_base32(bytes in proptest::collection::vec(any::<u8>(), 1..8)) {
        let quanta: Vec<u8> = bytes.iter().copied().cycle().take(bytes.len() * 5).collect();
        let encoded = encode_standard(&quanta);
        let key = decode(&encoded);
        prop_assert_eq!(key.expose(), quanta.as_slice());
    }
}

/// Minimal unpadded RFC 4648 encoder for inputs that are a multiple of 5 bytes.
fn encode_standard(bytes: &[u8]) -> String {
    const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
    let mut out = String::new();
    for chunk in bytes.chunks(5) {
        let mut block = [0u8; 8];
        block[3..].copy_from_slice(chunk);
        let value = u64::from_be_bytes(block);
        for i in (0..8).rev() {
            out.push(char::from(ALPHABET[((value >> (i * 5)) & 0x1F) as usize]));
        }
    }
    out
}
