//! AES-256 block encryption of account passwords
//!
//! Encryption format: `base64(AES-256-ECB(plaintext, PKCS#7 padding))`
//! - No IV: ECB mode encrypts every 16-byte block independently
//! - Standard base64 alphabet with `=` padding
//!
//! Equal plaintexts encrypt to equal ciphertexts under the same key, and the
//! ciphertext carries no authentication tag. A wrong key or a tampered block
//! is only detected through the padding and UTF-8 checks on decryption.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::{engine::general_purpose::STANDARD, Engine};

use super::DerivedKey;
use crate::error::{Result, VaultError};

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

/// AES block size in bytes
const BLOCK_LEN: usize = 16;

/// Raw ciphertext bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// Padded ciphertext, a whole number of AES blocks
    pub ciphertext: Vec<u8>,
}

impl std::fmt::Display for EncryptedData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&STANDARD.encode(&self.ciphertext))
    }
}

impl EncryptedData {
    /// Parse from the base64 text format
    pub fn from_string(s: &str) -> Result<Self> {
        let ciphertext = STANDARD
            .decode(s.trim())
            .map_err(|e| VaultError::DecryptionError(format!("Invalid base64: {}", e)))?;

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(VaultError::DecryptionError(format!(
                "Invalid ciphertext length: {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_LEN
            )));
        }

        Ok(Self { ciphertext })
    }
}

/// Encrypt plaintext using AES-256-ECB with PKCS#7 padding
///
/// # Arguments
/// * `plaintext` - The data to encrypt
/// * `key` - The 256-bit encryption key
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<EncryptedData> {
    let cipher = Aes256EcbEnc::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(EncryptedData { ciphertext })
}

/// Encrypt a string and return the serialized format
pub fn encrypt_string(plaintext: &str, key: &DerivedKey) -> Result<String> {
    let encrypted = encrypt(plaintext.as_bytes(), key)?;
    Ok(encrypted.to_string())
}

/// Decrypt ciphertext using AES-256-ECB and strip the PKCS#7 padding
///
/// Fails when the padding does not check out, which is what a wrong key or
/// a corrupted block almost always produces.
pub fn decrypt(encrypted: &EncryptedData, key: &DerivedKey) -> Result<Vec<u8>> {
    let cipher = Aes256EcbDec::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::DecryptionError(e.to_string()))?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&encrypted.ciphertext)
        .map_err(|_| {
            VaultError::DecryptionError("Invalid padding - wrong key or corrupted data".to_string())
        })
}

/// Decrypt from serialized format and return as string
pub fn decrypt_string(encrypted_str: &str, key: &DerivedKey) -> Result<String> {
    let encrypted = EncryptedData::from_string(encrypted_str)?;
    let plaintext = decrypt(&encrypted, key)?;
    String::from_utf8(plaintext)
        .map_err(|e| VaultError::DecryptionError(format!("Invalid UTF-8: {}", e)))
}
