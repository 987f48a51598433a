#![allow(clippy::unwrap_used)]

//! Integration tests: provisioning URI → stored secret → code.

use keyfob_otp_core::{generate_at, parse, parse_detailed, ProvisioningRecord, UriError};

#[test]
fn scanned_uri_secret_drives_the_engine() {
    let record = parse(
        "otpauth://totp/Example:alice@google.com?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&issuer=Example",
    )
    .expect("valid provisioning URI");
    assert_eq!(record.issuer, "Example");
    assert_eq!(record.label, "alice@google.com");

    let code = generate_at(&record.secret, 59).expect("generate");
    assert_eq!(code.as_str(), "287082");
}

#[test]
fn rejections_are_categorized() {
    let cases = [
        ("https://example.com/?secret=AAAA", UriError::NotOtpAuth),
        ("otpauth://hotp/x?secret=AAAA&counter=1", UriError::UnsupportedType("hotp".into())),
        ("otpauth://totp/x?issuer=Y", UriError::MissingSecret),
    ];
    for (uri, expected) in cases {
        assert_eq!(parse_detailed(uri), Err(expected), "for {uri}");
        assert_eq!(parse(uri), None);
    }
}

#[test]
fn record_serializes_with_plain_field_names() {
    let record = ProvisioningRecord {
        issuer: "GitHub".into(),
        label: "octocat".into(),
        secret: "JBSWY3DPEHPK3PXP".into(),
    };
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"issuer":"GitHub","label":"octocat","secret":"JBSWY3DPEHPK3PXP"}"#
    );
}
