//! Account records and the in-memory table that holds them

mod table;
mod types;

pub use table::CredentialTable;
pub use types::{validate_new_account, AccountRecord};
