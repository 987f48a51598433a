//! `keyfob-tokens` — token book for KEYFOB.
//!
//! Manages the ordered token list shown to the user: add, edit, delete and
//! reorder, JSON import/export, auto-fill matching, storage, and the
//! non-sensitive preferences file. Codes come from `keyfob-otp-core`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod token;

pub mod book;
pub mod store;

pub mod export;
pub mod import;

pub mod autofill;

pub mod preferences;

pub use autofill::autofill_target;
pub use book::TokenBook;
pub use error::{AutofillError, TokenError};
pub use export::{export_json, EXPORT_FILE_NAME};
pub use import::{import_json, parse_tokens, ImportSummary};
pub use preferences::Preferences;
pub use store::{JsonFileStore, MemoryStore, TokenStore};
pub use token::Token;
