//! In-memory account table

use std::collections::BTreeMap;

use super::types::AccountRecord;
use crate::error::{Result, VaultError};

/// Mapping from account name to encrypted secret
///
/// Names are unique (exact, case-sensitive match) and iterate in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialTable {
    entries: BTreeMap<String, String>,
}

impl CredentialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an account with exactly this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Encrypted secret stored under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Insert a record, refusing to replace an existing name
    pub fn insert(&mut self, record: AccountRecord) -> Result<()> {
        if self.entries.contains_key(&record.name) {
            return Err(VaultError::DuplicateAccount(record.name));
        }
        self.entries.insert(record.name, record.secret);
        Ok(())
    }

    /// Remove and return the record stored under `name`
    pub fn remove(&mut self, name: &str) -> Option<AccountRecord> {
        self.entries
            .remove_entry(name)
            .map(|(name, secret)| AccountRecord { name, secret })
    }

    /// Put back a record taken out with [`remove`](Self::remove)
    ///
    /// Replaces any record already stored under the same name.
    pub fn restore(&mut self, record: AccountRecord) {
        self.entries.insert(record.name, record.secret);
    }

    /// Account names in ascending lexicographic order
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterate over `(name, secret)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
