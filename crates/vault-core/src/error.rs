//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Account name and password must contain characters")]
    BlankInput,

    #[error("Account name must be unique: {0}")]
    DuplicateAccount(String),

    #[error("Account name must not contain line breaks: {0:?}")]
    InvalidAccountName(String),

    #[error("Password length {length} is too short for {required} required character classes")]
    PasswordTooShort { length: usize, required: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed accounts file at line {line}: {reason}")]
    FormatError { line: usize, reason: String },

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Decryption failed: {0}")]
    DecryptionError(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Coarse error classification handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected user input; show inline and let the user retry
    Validation,
    /// File creation, read, or write failure
    Io,
    /// Persisted data could not be parsed
    Format,
    /// Key derivation or cipher failure
    Crypto,
    /// The named account does not exist
    NotFound,
}

impl ErrorKind {
    /// Whether the store session cannot reasonably continue after this error
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorKind::Io | ErrorKind::Format)
    }
}

impl VaultError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::BlankInput
            | VaultError::DuplicateAccount(_)
            | VaultError::InvalidAccountName(_)
            | VaultError::PasswordTooShort { .. } => ErrorKind::Validation,
            VaultError::IoError(_) => ErrorKind::Io,
            VaultError::FormatError { .. } | VaultError::SerializationError(_) => ErrorKind::Format,
            VaultError::KeyDerivationError(_)
            | VaultError::EncryptionError(_)
            | VaultError::DecryptionError(_) => ErrorKind::Crypto,
            VaultError::AccountNotFound(_) => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(VaultError::BlankInput.kind(), ErrorKind::Validation);
        assert_eq!(
            VaultError::DuplicateAccount("mail".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            VaultError::FormatError { line: 3, reason: "x".to_string() }.kind(),
            ErrorKind::Format
        );
        assert_eq!(
            VaultError::DecryptionError("bad padding".to_string()).kind(),
            ErrorKind::Crypto
        );
        assert_eq!(
            VaultError::AccountNotFound("mail".to_string()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_fatal_kinds() {
        let io = VaultError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(io.kind().is_fatal());
        assert!(!VaultError::BlankInput.kind().is_fatal());
        assert!(!VaultError::AccountNotFound("a".to_string()).kind().is_fatal());
    }

    #[test]
    fn test_format_error_names_line() {
        let err = VaultError::FormatError {
            line: 7,
            reason: "missing ciphertext".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
