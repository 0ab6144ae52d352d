//! Account record type definitions

use crate::error::{Result, VaultError};

/// A stored account: display name plus encrypted password
///
/// Only the name is ever shown to a caller; the secret is opaque
/// base64 ciphertext and is never compared or sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Unique, case-sensitive account name
    pub name: String,
    /// Encrypted password in the base64 text format
    pub secret: String,
}

impl AccountRecord {
    /// Create a record from a name and an already-encrypted secret
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }
}

/// Check a name and plaintext password before they are stored
///
/// Both must contain a non-whitespace character, and the name must fit on
/// a single line of the accounts file.
pub fn validate_new_account(name: &str, password: &str) -> Result<()> {
    if name.trim().is_empty() || password.trim().is_empty() {
        return Err(VaultError::BlankInput);
    }
    if name.contains(|c: char| c == '\n' || c == '\r') {
        return Err(VaultError::InvalidAccountName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_inputs_rejected() {
        assert!(matches!(validate_new_account("", "pw"), Err(VaultError::BlankInput)));
        assert!(matches!(validate_new_account("   ", "pw"), Err(VaultError::BlankInput)));
        assert!(matches!(validate_new_account("mail", ""), Err(VaultError::BlankInput)));
        assert!(matches!(validate_new_account("mail", " \t"), Err(VaultError::BlankInput)));
    }

    #[test]
    fn test_line_breaks_rejected() {
        assert!(matches!(
            validate_new_account("mail\nbank", "pw"),
            Err(VaultError::InvalidAccountName(_))
        ));
        assert!(matches!(
            validate_new_account("mail\r", "pw"),
            Err(VaultError::InvalidAccountName(_))
        ));
    }

    #[test]
    fn test_valid_inputs() {
        assert!(validate_new_account("mail", "Sn0wman!").is_ok());
        assert!(validate_new_account(" padded name ", "pass word").is_ok());
    }
}
