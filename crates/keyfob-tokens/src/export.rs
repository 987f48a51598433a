//! JSON export of the token list.

use crate::error::TokenError;
use crate::token::Token;

/// Default file name offered when saving an export.
pub const EXPORT_FILE_NAME: &str = "otp-tokens.json";

/// Serialize tokens as a pretty-printed JSON array (2-space indent).
///
/// The output contains plaintext secrets.
///
/// # Errors
/// Returns [`TokenError::Json`] if serialization fails.
pub fn export_json(tokens: &[Token]) -> Result<String, TokenError> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_exports_as_empty_array() {
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn export_layout_is_stable() {
        let tokens = [
            Token::new("GitHub", "octocat", "JBSWY3DPEHPK3PXP"),
            Token::new("Bank", "me", "GEZDGNBV").with_autofill("bank.example", "input#otp"),
        ];
        insta::assert_snapshot!(export_json(&tokens).unwrap(), @r#"
        [
          {
            "issuer": "GitHub",
            "label": "octocat",
            "secret": "JBSWY3DPEHPK3PXP",
            "url": "",
            "selector": ""
          },
          {
            "issuer": "Bank",
            "label": "me",
            "secret": "GEZDGNBV",
            "url": "bank.example",
            "selector": "input#otp"
          }
        ]
        "#);
    }
}
