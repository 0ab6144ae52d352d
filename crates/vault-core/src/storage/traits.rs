//! Storage trait definitions

use std::path::Path;

use crate::account::CredentialTable;
use crate::error::Result;

/// Trait for account table persistence backends
///
/// Backends always read and write the whole table; there are no
/// incremental updates.
pub trait AccountStorage: Send + Sync {
    /// Read the persisted table, creating an empty store if none exists
    fn load(&self) -> Result<CredentialTable>;

    /// Replace the persisted table with `table`
    ///
    /// On failure the previously persisted contents must remain intact.
    fn save(&self, table: &CredentialTable) -> Result<()>;

    /// Where this backend keeps its data
    fn location(&self) -> &Path;
}
