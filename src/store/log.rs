//! Append-only transaction log.
//!
//! One durable write per record, never rewritten or deleted. Queries scan
//! the full log and filter by account number; at personal-ledger scale this
//! needs no index.

use crate::error::Result;
use crate::transaction::Transaction;
use log::debug;
use std::fs::OpenOptions;
use std::path::PathBuf;

const HEADER: [&str; 8] = [
    "id",
    "timestamp",
    "accountNumber",
    "type",
    "amount",
    "balanceAfter",
    "details",
    "relatedAccount",
];

/// Durable audit trail of money movements.
#[derive(Debug)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    pub fn new(path: PathBuf) -> Self {
        TransactionLog { path }
    }

    /// Creates an empty log (header only) if the file is missing.
    pub fn ensure(&self) -> Result<()> {
        super::seed_file(&self.path, &HEADER)
    }

    /// Appends one record to the log.
    pub fn append(&self, tx: &Transaction) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(tx)?;
        writer.flush()?;
        debug!("appended {} record {} for {}", tx.kind, tx.id, tx.account_number);
        Ok(())
    }

    /// Loads every record belonging to the given account, in file order.
    ///
    /// A malformed row is a storage error and aborts the read.
    pub fn load_for(&self, account_number: &str) -> Result<Vec<Transaction>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<Transaction>() {
            let tx: Transaction = row?;
            if tx.account_number == account_number {
                records.push(tx);
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn open_log(dir: &std::path::Path) -> TransactionLog {
        let log = TransactionLog::new(dir.join("transactions.csv"));
        log.ensure().unwrap();
        log
    }

    #[test]
    fn test_append_and_load_filters_by_account() {
        let dir = tempdir().unwrap();
        let log = open_log(dir.path());

        log.append(&Transaction::deposit("A1", money("10.00"), money("10.00")))
            .unwrap();
        log.append(&Transaction::deposit("B2", money("20.00"), money("20.00")))
            .unwrap();
        log.append(&Transaction::withdrawal("A1", money("5.00"), money("5.00")))
            .unwrap();

        let for_a = log.load_for("A1").unwrap();
        assert_eq!(for_a.len(), 2);
        assert_eq!(for_a[0].amount, money("10.00"));
        assert_eq!(for_a[1].amount, money("5.00"));

        let for_b = log.load_for("B2").unwrap();
        assert_eq!(for_b.len(), 1);
    }

    #[test]
    fn test_append_preserves_earlier_records() {
        let dir = tempdir().unwrap();
        let log = open_log(dir.path());

        for i in 1..=4 {
            let balance = Money::new(rust_decimal::Decimal::from(i));
            log.append(&Transaction::deposit("A1", money("1.00"), balance))
                .unwrap();
        }

        let records = log.load_for("A1").unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[3].balance_after, money("4.00"));
    }

    #[test]
    fn test_details_with_commas_quotes_and_newlines_round_trip() {
        let dir = tempdir().unwrap();
        let log = open_log(dir.path());

        let mut tx = Transaction::deposit("A1", money("1.00"), money("1.00"));
        tx.details = "rent, \"June\"\nsplit".to_string();
        log.append(&tx).unwrap();

        let records = log.load_for("A1").unwrap();
        assert_eq!(records[0].details, "rent, \"June\"\nsplit");
    }

    #[test]
    fn test_related_account_empty_when_absent() {
        let dir = tempdir().unwrap();
        let log = open_log(dir.path());

        log.append(&Transaction::deposit("A1", money("1.00"), money("1.00")))
            .unwrap();
        log.append(&Transaction::transfer_out("A1", money("1.00"), money("0.00"), "B2"))
            .unwrap();

        let records = log.load_for("A1").unwrap();
        assert!(records[0].related_account.is_none());
        assert_eq!(records[1].related_account.as_deref(), Some("B2"));
    }

    #[test]
    fn test_timestamp_round_trips_at_second_resolution() {
        let dir = tempdir().unwrap();
        let log = open_log(dir.path());

        let tx = Transaction::deposit("A1", money("1.00"), money("1.00"));
        log.append(&tx).unwrap();

        let records = log.load_for("A1").unwrap();
        assert_eq!(records[0].timestamp, tx.timestamp);
        assert_eq!(records[0].id, tx.id);
    }
}
