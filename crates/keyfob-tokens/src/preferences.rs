//! Non-sensitive user preferences — stored as plain JSON next to the tokens.
//!
//! The display language is an explicit value handed to whatever renders
//! text, rather than process-wide state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::store::write_atomic;

/// Language tags with a bundled translation.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en-US", "zh-CN"];

/// Fallback language tag.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Non-sensitive application preferences.
///
/// Persisted to `{data_dir}/preferences.json`. All fields have defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// BCP 47 language tag (`"en-US"` or `"zh-CN"`).
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.into()
}

// ── Language selection ─────────────────────────────────────────────

/// Whether `tag` has a bundled translation.
#[must_use]
pub fn is_supported(tag: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&tag)
}

impl Preferences {
    /// Pick the initial language: a previously stored choice wins, then any
    /// Chinese browser locale maps to `zh-CN`, everything else to `en-US`.
    #[must_use]
    pub fn detect(stored: Option<&str>, browser_language: &str) -> Self {
        let language = match stored {
            Some(tag) if !tag.is_empty() => tag.to_owned(),
            _ if browser_language.starts_with("zh") => "zh-CN".to_owned(),
            _ => default_language(),
        };
        Self { language }
    }

    /// Language to actually render with; unsupported tags fall back to English.
    #[must_use]
    pub fn effective_language(&self) -> &str {
        if is_supported(&self.language) {
            &self.language
        } else {
            DEFAULT_LANGUAGE
        }
    }

    /// Switch to `tag`.
    ///
    /// # Errors
    /// Returns [`TokenError::UnsupportedLanguage`] and keeps the current
    /// language if `tag` has no translation.
    pub fn set_language(&mut self, tag: &str) -> Result<(), TokenError> {
        if !is_supported(tag) {
            return Err(TokenError::UnsupportedLanguage(tag.to_owned()));
        }
        tag.clone_into(&mut self.language);
        Ok(())
    }
}

// ── File I/O ───────────────────────────────────────────────────────

const PREFERENCES_FILE: &str = "preferences.json";
const PREFERENCES_TMP_FILE: &str = ".preferences.json.tmp";

impl Preferences {
    /// Load preferences from `{data_dir}/preferences.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or
    /// contains invalid JSON (corrupt-file recovery).
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(PREFERENCES_FILE);
        fs::read_to_string(&path).map_or_else(
            |_| Self::default(),
            |contents| {
                serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!("ignoring corrupt preferences file: {e}");
                    Self::default()
                })
            },
        )
    }

    /// Persist preferences to `{data_dir}/preferences.json`.
    ///
    /// Written atomically (`.tmp` then rename), owner-only on Unix.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory does not exist or the
    /// file system rejects the write/rename.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_atomic(
            data_dir,
            PREFERENCES_TMP_FILE,
            &data_dir.join(PREFERENCES_FILE),
            &json,
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────────
