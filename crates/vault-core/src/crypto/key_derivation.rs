//! Password-based key derivation using PBKDF2-HMAC-SHA256
//!
//! The store keys every account file with the same static passphrase and
//! salt. Anyone holding this source can derive the key, so the encryption
//! only keeps secrets away from casual inspection of the file.

use hmac::Hmac;
use sha2::Sha256;

use super::secure_memory::{DerivedKey, KEY_LEN};
use crate::error::{Result, VaultError};

/// Static passphrase every store is keyed with
pub const DEFAULT_PASSPHRASE: &str = "passwordToTestEncryption";

/// Static salt every store is keyed with
pub const DEFAULT_SALT: &str = "testSalt";

/// Parameters for PBKDF2 key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// PBKDF2 iteration count (default: 65536)
    pub iterations: u32,
    /// Output length in bits (only 256 is supported)
    pub key_length_bits: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            iterations: 65_536,
            key_length_bits: 256,
        }
    }
}

/// Derive a 256-bit key from a passphrase using PBKDF2-HMAC-SHA256
///
/// # Arguments
/// * `passphrase` - Secret the key is derived from
/// * `salt` - Salt bytes
/// * `params` - Optional key derivation parameters
///
/// # Returns
/// A 32-byte key suitable for AES-256 encryption
pub fn derive_key(
    passphrase: &str,
    salt: &[u8],
    params: Option<KeyDerivationParams>,
) -> Result<DerivedKey> {
    let params = params.unwrap_or_default();

    if params.iterations == 0 {
        return Err(VaultError::KeyDerivationError(
            "Iteration count must be positive".to_string(),
        ));
    }
    if params.key_length_bits as usize != KEY_LEN * 8 {
        return Err(VaultError::KeyDerivationError(format!(
            "Unsupported key length: {} bits (expected {})",
            params.key_length_bits,
            KEY_LEN * 8
        )));
    }

    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(
        passphrase.as_bytes(),
        salt,
        params.iterations,
        &mut key_bytes,
    )
    .map_err(|e| VaultError::KeyDerivationError(e.to_string()))?;

    let key = DerivedKey::new(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);
    Ok(key)
}

/// Derive the store key from the built-in passphrase and salt
pub fn default_key(params: Option<KeyDerivationParams>) -> Result<DerivedKey> {
    derive_key(DEFAULT_PASSPHRASE, DEFAULT_SALT.as_bytes(), params)
}
