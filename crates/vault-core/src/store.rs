//! Credential store orchestration
//!
//! The store owns the in-memory account table, the key used to encrypt
//! passwords, and the backend that persists the table. Every mutation is
//! saved before it is reported as successful; if the save fails the table
//! is rolled back so memory and disk never disagree.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::account::{validate_new_account, AccountRecord, CredentialTable};
use crate::crypto::{decrypt_string, default_key, encrypt_string, DerivedKey, RevealedSecret};
use crate::error::{Result, VaultError};
use crate::generator::{self, PasswordRequirements};
use crate::storage::{AccountStorage, TextFileStorage};

/// An open store session against one backing file
pub struct CredentialStore {
    /// Persistence backend
    storage: Box<dyn AccountStorage>,
    /// Account name -> encrypted password
    table: CredentialTable,
    /// Key every password is encrypted under
    key: DerivedKey,
}

impl CredentialStore {
    /// Open the accounts file at `path` with the built-in key
    ///
    /// A missing file is created empty. Errors from here are fatal for the
    /// session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let key = default_key(None)?;
        Self::open_with(Box::new(TextFileStorage::new(path)), key)
    }

    /// Open a store over any backend with an explicit key
    pub fn open_with(storage: Box<dyn AccountStorage>, key: DerivedKey) -> Result<Self> {
        let table = storage.load()?;
        info!(
            "Opened store at {:?} with {} accounts",
            storage.location(),
            table.len()
        );

        Ok(Self {
            storage,
            table,
            key,
        })
    }

    /// Where the backing data lives
    pub fn location(&self) -> &Path {
        self.storage.location()
    }

    /// Account names in ascending order
    pub fn list(&self) -> Vec<String> {
        self.table.names()
    }

    /// Whether an account with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Read-only view of the current table
    pub fn table(&self) -> &CredentialTable {
        &self.table
    }

    /// Encrypt and store a new account password
    pub fn add(&mut self, name: &str, password: &str) -> Result<()> {
        validate_new_account(name, password)?;
        if self.table.contains(name) {
            return Err(VaultError::DuplicateAccount(name.to_string()));
        }

        let secret = encrypt_string(password, &self.key)?;
        self.table.insert(AccountRecord::new(name, secret))?;

        if let Err(e) = self.storage.save(&self.table) {
            self.table.remove(name);
            return Err(e);
        }

        info!("Added account: {}", name);
        Ok(())
    }

    /// Generate a password and store it under `name` in one step
    pub fn add_generated(
        &mut self,
        name: &str,
        length: usize,
        requirements: PasswordRequirements,
    ) -> Result<RevealedSecret> {
        let password = RevealedSecret::new(generator::generate(length, requirements)?);
        self.add(name, password.expose())?;
        Ok(password)
    }

    /// Remove an account
    ///
    /// Removing a name that is not present is a no-op and returns `false`.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let record = match self.table.remove(name) {
            Some(record) => record,
            None => {
                debug!("Nothing to remove for account: {}", name);
                return Ok(false);
            }
        };

        if let Err(e) = self.storage.save(&self.table) {
            self.table.restore(record);
            return Err(e);
        }

        info!("Removed account: {}", name);
        Ok(true)
    }

    /// Decrypt the password stored for `name`
    pub fn reveal(&self, name: &str) -> Result<RevealedSecret> {
        let secret = self
            .table
            .get(name)
            .ok_or_else(|| VaultError::AccountNotFound(name.to_string()))?;

        match decrypt_string(secret, &self.key) {
            Ok(plaintext) => {
                debug!("Revealed account: {}", name);
                Ok(RevealedSecret::new(plaintext))
            }
            Err(e) => {
                warn!("Could not decrypt account {}: {}", name, e);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("location", &self.storage.location())
            .field("accounts", &self.table.len())
            .finish()
    }
}
