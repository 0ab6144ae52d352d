//! Cryptographic primitives for account password storage
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key derivation from a passphrase
//! - AES-256 block encryption with base64 text encoding
//! - Secure memory handling with zeroize

mod encryption;
mod key_derivation;
mod secure_memory;

pub use encryption::{decrypt, decrypt_string, encrypt, encrypt_string, EncryptedData};
pub use key_derivation::{
    default_key, derive_key, KeyDerivationParams, DEFAULT_PASSPHRASE, DEFAULT_SALT,
};
pub use secure_memory::{DerivedKey, RevealedSecret, KEY_LEN};
