//! Flat-file persistence: the account snapshot table and the append-only
//! transaction log, both CSV under a single data directory.

pub mod accounts;
pub mod log;

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub use accounts::AccountStore;
pub use log::TransactionLog;

const ACCOUNTS_FILE: &str = "accounts.csv";
const TRANSACTIONS_FILE: &str = "transactions.csv";

/// Owns both backing stores for one data directory.
#[derive(Debug)]
pub struct Storage {
    pub accounts: AccountStore,
    pub log: TransactionLog,
}

impl Storage {
    /// Opens the data directory, creating it and seeding missing files with
    /// their header rows.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let storage = Storage {
            accounts: AccountStore::new(data_dir.join(ACCOUNTS_FILE)),
            log: TransactionLog::new(data_dir.join(TRANSACTIONS_FILE)),
        };
        storage.accounts.ensure()?;
        storage.log.ensure()?;
        Ok(storage)
    }
}

/// Writes a header-only CSV file at `path` if it does not exist yet.
fn seed_file(path: &Path, header: &[&str]) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_open_seeds_both_files_with_headers() {
        let dir = tempdir().unwrap();
        Storage::open(dir.path()).unwrap();

        let accounts = fs::read_to_string(dir.path().join("accounts.csv")).unwrap();
        assert_eq!(
            accounts.trim(),
            "accountNumber,username,passwordHash,fullName,balance,lastInterestApplied,createdAt"
        );

        let log = fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
        assert_eq!(
            log.trim(),
            "id,timestamp,accountNumber,type,amount,balanceAfter,details,relatedAccount"
        );
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempdir().unwrap();
        Storage::open(dir.path()).unwrap();
        Storage::open(dir.path()).unwrap();

        let log = fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
        assert_eq!(log.lines().count(), 1);
    }
}
