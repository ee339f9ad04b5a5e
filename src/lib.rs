//! # Passbook
//!
//! A small personal banking ledger: accounts, deposits, withdrawals,
//! transfers, daily-prorated interest, and statements, persisted to flat
//! CSV files.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: balances use 2 decimal places via `rust_decimal`
//! - **Append-only history**: the transaction log is a durable audit trail
//! - **Atomic snapshots**: the account table is rewritten via temp-and-rename
//! - **Single caller**: mutating operations take `&mut self`, no internal locking
//!
//! ## Example
//!
//! ```no_run
//! use passbook::{Bank, Money};
//! use std::str::FromStr;
//!
//! # fn main() -> passbook::Result<()> {
//! let mut bank = Bank::open("bank_data")?;
//! let alice = bank.register("alice", "Alice A", "secret1", Money::ZERO)?;
//! bank.deposit("alice", Money::from_str("100.00").unwrap())?;
//! for tx in bank.mini_statement(&alice.account_number, 5)? {
//!     println!("{} {} {}", tx.timestamp, tx.kind, tx.amount);
//! }
//! bank.persist()?;
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod bank;
pub mod error;
pub mod ident;
pub mod money;
pub mod store;
pub mod transaction;

pub use account::Account;
pub use bank::Bank;
pub use error::{LedgerError, Result};
pub use money::Money;
pub use store::Storage;
pub use transaction::{Transaction, TxKind};
