//! Account snapshot store.
//!
//! The snapshot is the full current-state table of accounts, rewritten
//! wholesale on every save. Writes go to a temporary sibling file first and
//! are renamed into place, so a crash mid-write leaves the previous snapshot
//! intact.

use crate::account::Account;
use crate::error::Result;
use log::debug;
use std::fs;
use std::path::PathBuf;

const HEADER: [&str; 7] = [
    "accountNumber",
    "username",
    "passwordHash",
    "fullName",
    "balance",
    "lastInterestApplied",
    "createdAt",
];

/// Durable table of current account state.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: PathBuf) -> Self {
        AccountStore { path }
    }

    /// Creates an empty snapshot (header only) if the file is missing.
    pub fn ensure(&self) -> Result<()> {
        super::seed_file(&self.path, &HEADER)
    }

    /// Loads all accounts from the snapshot.
    ///
    /// A malformed row is a storage error and aborts the load.
    pub fn load(&self) -> Result<Vec<Account>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut accounts = Vec::new();
        for row in reader.deserialize::<Account>() {
            accounts.push(row?);
        }
        debug!("loaded {} account(s) from {}", accounts.len(), self.path.display());
        Ok(accounts)
    }

    /// Rewrites the entire snapshot from the given accounts.
    ///
    /// The table is written to `<path>.tmp` and renamed over the live file
    /// once complete.
    pub fn save(&self, accounts: &[Account]) -> Result<()> {
        let tmp = self.path.with_extension("csv.tmp");

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(HEADER)?;
        for account in accounts {
            writer.serialize(account)?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.path)?;
        debug!("saved {} account(s) to {}", accounts.len(), self.path.display());
        Ok(())
    }
}
