//! Storage backends for account table persistence
//!
//! The accounts file is a line-oriented text file holding one
//! name/ciphertext pair per record. It is rewritten in full on every save.

pub(crate) mod atomic;
mod text_file;
mod traits;

pub use text_file::{parse_accounts, serialize_accounts, TextFileStorage, DEFAULT_ACCOUNTS_PATH};
pub use traits::AccountStorage;
