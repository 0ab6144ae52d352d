//! Plain text accounts file backend
//!
//! File format, one record per two lines, records separated by a blank line:
//!
//! ```text
//! <account name>
//! <base64 ciphertext>
//!
//! <account name>
//! <base64 ciphertext>
//! ```
//!
//! The file never ends with a blank line. Records are written in name order.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{atomic, AccountStorage};
use crate::account::{AccountRecord, CredentialTable};
use crate::error::{Result, VaultError};

/// Default location of the accounts file, relative to the working directory
pub const DEFAULT_ACCOUNTS_PATH: &str = "PasswordManager/accounts.txt";

/// Accounts file storage backend
#[derive(Debug, Clone)]
pub struct TextFileStorage {
    /// Path of the accounts file
    path: PathBuf,
}

impl TextFileStorage {
    /// Create a backend for the accounts file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the accounts file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountStorage for TextFileStorage {
    fn load(&self) -> Result<CredentialTable> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No accounts file at {:?}, creating an empty one", self.path);
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .open(&self.path)?;
                return Ok(CredentialTable::new());
            }
            Err(e) => return Err(e.into()),
        };

        let contents = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            VaultError::FormatError {
                line: valid.iter().filter(|b| **b == b'\n').count() + 1,
                reason: "invalid UTF-8".to_string(),
            }
        })?;

        let table = parse_accounts(&contents)?;
        debug!("Loaded {} accounts from {:?}", table.len(), self.path);
        Ok(table)
    }

    fn save(&self, table: &CredentialTable) -> Result<()> {
        atomic::write_atomically(&self.path, serialize_accounts(table).as_bytes())?;
        debug!("Saved {} accounts to {:?}", table.len(), self.path);
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Parse the accounts file format into a table
///
/// Any malformed line fails the whole parse; a partially filled table is
/// never returned. Line numbers in errors are 1-based.
pub fn parse_accounts(contents: &str) -> Result<CredentialTable> {
    let mut table = CredentialTable::new();
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .peekable();

    while let Some((name_line, name)) = lines.next() {
        // Blank lines separate records
        if is_blank(name) {
            continue;
        }

        let secret = match lines.next() {
            Some((_, secret)) if !is_blank(secret) => secret,
            Some((line, _)) => {
                return Err(VaultError::FormatError {
                    line,
                    reason: format!(
                        "expected ciphertext for account {:?}, found a blank line",
                        name
                    ),
                })
            }
            None => {
                return Err(VaultError::FormatError {
                    line: name_line,
                    reason: format!("account {:?} has no ciphertext line", name),
                })
            }
        };

        if let Some((line, next)) = lines.peek() {
            if !is_blank(next) {
                return Err(VaultError::FormatError {
                    line: *line,
                    reason: "expected a blank line between records".to_string(),
                });
            }
        }

        table
            .insert(AccountRecord::new(name, secret))
            .map_err(|_| VaultError::FormatError {
                line: name_line,
                reason: format!("duplicate account {:?}", name),
            })?;
    }

    Ok(table)
}

/// Serialize a table into the accounts file format
pub fn serialize_accounts(table: &CredentialTable) -> String {
    table
        .iter()
        .map(|(name, secret)| format!("{}\n{}", name, secret))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_table() -> CredentialTable {
        let mut table = CredentialTable::new();
        table.insert(AccountRecord::new("mail", "bWFpbA==")).unwrap();
        table.insert(AccountRecord::new("bank", "YmFuaw==")).unwrap();
        table.insert(AccountRecord::new("Work VPN", "dnBu")).unwrap();
        table
    }

    #[test]
    fn test_serialize_sorted_without_trailing_blank_line() {
        let contents = serialize_accounts(&sample_table());

        assert_eq!(
            contents,
            "Work VPN\ndnBu\n\nbank\nYmFuaw==\n\nmail\nbWFpbA=="
        );
        assert!(!contents.ends_with('\n'));
    }

    #[test]
    fn test_serialize_empty_table() {
        assert_eq!(serialize_accounts(&CredentialTable::new()), "");
    }

    #[test]
    fn test_parse_serialized() {
        let table = sample_table();
        let parsed = parse_accounts(&serialize_accounts(&table)).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_parse_tolerates_extra_blank_lines_and_crlf() {
        let contents = "\r\nmail\r\nbWFpbA==\r\n\r\n\r\nbank\r\nYmFuaw==\r\n\r\n";
        let table = parse_accounts(contents).unwrap();

        assert_eq!(table.names(), vec!["bank", "mail"]);
        assert_eq!(table.get("mail"), Some("bWFpbA=="));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_accounts("").unwrap().is_empty());
        assert!(parse_accounts("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_ciphertext() {
        let result = parse_accounts("mail\nbWFpbA==\n\nbank");
        assert!(matches!(result, Err(VaultError::FormatError { line: 4, .. })));
    }

    #[test]
    fn test_parse_blank_ciphertext() {
        let result = parse_accounts("mail\n\nbWFpbA==");
        assert!(matches!(result, Err(VaultError::FormatError { line: 2, .. })));
    }

    #[test]
    fn test_parse_missing_separator() {
        let result = parse_accounts("mail\nbWFpbA==\nbank\nYmFuaw==");
        assert!(matches!(result, Err(VaultError::FormatError { line: 3, .. })));
    }

    #[test]
    fn test_parse_duplicate_account() {
        let result = parse_accounts("mail\nYQ==\n\nmail\nYg==");
        assert!(matches!(result, Err(VaultError::FormatError { line: 4, .. })));
    }

    #[test]
    fn test_load_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.txt");
        let storage = TextFileStorage::new(&path);

        let table = storage.load().unwrap();

        assert!(table.is_empty());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            TextFileStorage::new(temp_dir.path().join("missing").join("accounts.txt"));

        let result = storage.load();
        assert!(matches!(result, Err(VaultError::IoError(_))));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.txt");
        fs::write(&path, b"mail\nYQ==\n\n\xff\xfe\nYg==").unwrap();

        let result = TextFileStorage::new(&path).load();
        assert!(matches!(result, Err(VaultError::FormatError { line: 4, .. })));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TextFileStorage::new(temp_dir.path().join("accounts.txt"));
        let table = sample_table();

        storage.save(&table).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, table);
        assert!(!atomic::scratch_path(storage.path()).exists());
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TextFileStorage::new(temp_dir.path().join("accounts.txt"));

        storage.save(&sample_table()).unwrap();

        let mut smaller = CredentialTable::new();
        smaller.insert(AccountRecord::new("only", "b25seQ==")).unwrap();
        storage.save(&smaller).unwrap();

        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "only\nb25seQ==");
    }

    #[test]
    fn test_failed_save_keeps_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.txt");
        let storage = TextFileStorage::new(&path);
        storage.save(&sample_table()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory squatting on the scratch path makes the write fail
        fs::create_dir(atomic::scratch_path(storage.path())).unwrap();
        let mut changed = sample_table();
        changed.remove("mail");

        assert!(matches!(storage.save(&changed), Err(VaultError::IoError(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_tmp_named_accounts_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.tmp");
        let storage = TextFileStorage::new(&path);
        assert_ne!(atomic::scratch_path(storage.path()), path);

        storage.save(&sample_table()).unwrap();
        let before = fs::read_to_string(&path).unwrap();
        assert_eq!(storage.load().unwrap(), sample_table());

        fs::create_dir(atomic::scratch_path(storage.path())).unwrap();
        assert!(matches!(
            storage.save(&CredentialTable::new()),
            Err(VaultError::IoError(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
