//! # vault-core
//!
//! Core functionality for passvault including:
//! - Random password generation with guaranteed character classes
//! - PBKDF2 key derivation and AES-256 encryption of account passwords
//! - A line-oriented accounts file with atomic saves
//! - A credential store that keeps the in-memory table and the file in step
//!
//! The store key is derived from a fixed, published passphrase and salt, so
//! the encryption only hides passwords from casual inspection of the file.

pub mod account;
pub mod crypto;
pub mod error;
pub mod generator;
pub mod settings;
pub mod storage;
mod store;

pub use account::{AccountRecord, CredentialTable};
pub use crypto::{
    decrypt_string, default_key, derive_key, encrypt_string, DerivedKey, KeyDerivationParams,
    RevealedSecret,
};
pub use error::{ErrorKind, Result, VaultError};
pub use generator::{generate, CharacterClass, PasswordRequirements};
pub use settings::{GeneratorSettings, Settings, SettingsManager};
pub use storage::{AccountStorage, TextFileStorage, DEFAULT_ACCOUNTS_PATH};
pub use store::CredentialStore;
