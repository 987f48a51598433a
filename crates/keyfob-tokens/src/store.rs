//! Persistence for the token list.
//!
//! The list is always read and written whole, in display order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TokenError;
use crate::token::Token;

/// Backing storage for the ordered token list.
pub trait TokenStore {
    /// Read the full list. An uninitialized store yields an empty list.
    ///
    /// # Errors
    /// Implementation-specific read or decode failure.
    fn load(&self) -> Result<Vec<Token>, TokenError>;

    /// Replace the full list.
    ///
    /// # Errors
    /// Implementation-specific write or encode failure.
    fn save(&mut self, tokens: &[Token]) -> Result<(), TokenError>;
}

// ── In-memory ──────────────────────────────────────────────────────

/// Store that keeps the list in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tokens: Vec<Token>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Result<Vec<Token>, TokenError> {
        Ok(self.tokens.clone())
    }

    fn save(&mut self, tokens: &[Token]) -> Result<(), TokenError> {
        self.tokens = tokens.to_vec();
        Ok(())
    }
}

// ── JSON file ──────────────────────────────────────────────────────

const TOKENS_FILE: &str = "tokens.json";
const TOKENS_TMP_FILE: &str = ".tokens.json.tmp";

/// Store that keeps the list as a JSON array in `{dir}/tokens.json`.
///
/// Uses the same layout as [`crate::export::export_json`], so the file
/// can be imported elsewhere as-is.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory must already exist when saving.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENS_FILE)
    }
}

impl TokenStore for JsonFileStore {
    /// Missing file → empty list. A corrupt file is an error, never
    /// silently replaced by an empty list.
    fn load(&self) -> Result<Vec<Token>, TokenError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Atomic write: `.tmp` file, owner-only permissions, then rename.
    fn save(&mut self, tokens: &[Token]) -> Result<(), TokenError> {
        let json = serde_json::to_string_pretty(tokens)?;
        write_atomic(&self.dir, TOKENS_TMP_FILE, &self.path(), &json)?;
        tracing::debug!(count = tokens.len(), "token list saved");
        Ok(())
    }
}

/// Write `contents` to `{dir}/{tmp_name}`, restrict it to the owner on Unix,
/// then rename it over `target`.
pub(crate) fn write_atomic(
    dir: &Path,
    tmp_name: &str,
    target: &Path,
    contents: &str,
) -> std::io::Result<()> {
    let tmp = dir.join(tmp_name);
    fs::write(&tmp, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        store.save(&[Token::new("A", "b", "AAAA")]).unwrap();
        assert_eq!(store.load().unwrap(), vec![Token::new("A", "b", "AAAA")]);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn file_store_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let tokens = vec![
            Token::new("B", "second", "BBBB"),
            Token::new("A", "first", "AAAA").with_autofill("example.com", "#otp"),
        ];
        store.save(&tokens).unwrap();
        assert_eq!(store.load().unwrap(), tokens);
    }

    #[test]
    fn file_store_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOKENS_FILE), "{ not json").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.load(), Err(TokenError::Json(_))));
    }

    #[test]
    fn file_store_save_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&[]).unwrap();
        assert!(!dir.path().join(TOKENS_TMP_FILE).exists());
        assert!(store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&[Token::new("A", "b", "AAAA")]).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "tokens.json should be owner-only (0600)");
    }
}
