//! Core ledger service.
//!
//! Owns the in-memory account registry, enforces every business rule, and
//! orchestrates the two backing stores. Each successful mutation appends its
//! transaction record(s) and then rewrites the account snapshot.
//!
//! Every mutating operation takes `&mut self`, so a `Bank` is single-caller
//! by construction; exposing it to concurrent callers requires an external
//! critical section around each call.

use crate::account::Account;
use crate::error::{LedgerError, Result};
use crate::ident;
use crate::money::Money;
use crate::store::Storage;
use crate::transaction::Transaction;
use chrono::Local;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;

const DAYS_PER_YEAR: i64 = 365;

/// Fixed annual interest rate: 4% p.a.
fn annual_rate() -> Decimal {
    Decimal::new(4, 2)
}

/// The ledger service.
///
/// Holds all accounts in memory, keyed by username with an account-number
/// index resolving to the same entries. Constructed by loading the snapshot
/// store; torn down by a final [`Bank::persist`].
pub struct Bank {
    storage: Storage,

    /// Registry, keyed by username.
    accounts: HashMap<String, Account>,

    /// Account number -> username index.
    numbers: HashMap<String, String>,
}

impl Bank {
    /// Opens the ledger at `data_dir`, creating the backing files if missing
    /// and loading the account snapshot into memory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let storage = Storage::open(data_dir)?;

        let mut accounts = HashMap::new();
        let mut numbers = HashMap::new();
        for account in storage.accounts.load()? {
            numbers.insert(account.account_number.clone(), account.username.clone());
            accounts.insert(account.username.clone(), account);
        }

        info!("ledger opened with {} account(s)", accounts.len());
        Ok(Bank {
            storage,
            accounts,
            numbers,
        })
    }

    /// Rewrites the full account snapshot, ordered by account number for
    /// deterministic output. Also serves as the shutdown call.
    pub fn persist(&self) -> Result<()> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        self.storage.accounts.save(&accounts)
    }

    /// Returns `true` if a username is registered.
    pub fn account_exists(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Returns the account for a username, if registered.
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    fn account_mut(&mut self, username: &str) -> Result<&mut Account> {
        self.accounts
            .get_mut(username)
            .ok_or_else(|| LedgerError::AccountNotFound(username.to_string()))
    }

    /// Registers a new account and returns it.
    ///
    /// An `opening_deposit` greater than zero goes through the normal
    /// deposit path, producing a deposit record.
    pub fn register(
        &mut self,
        username: &str,
        full_name: &str,
        password: &str,
        opening_deposit: Money,
    ) -> Result<Account> {
        if !ident::valid_username(username) {
            return Err(LedgerError::InvalidUsername(username.to_string()));
        }
        if self.account_exists(username) {
            return Err(LedgerError::DuplicateUsername(username.to_string()));
        }
        if full_name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if !ident::valid_password(password) {
            return Err(LedgerError::WeakCredential);
        }

        // The generator does not guarantee uniqueness; retry against the
        // registry until the number is free.
        let mut number = ident::account_number();
        while self.numbers.contains_key(&number) {
            number = ident::account_number();
        }

        let account = Account::new(
            number.clone(),
            username.to_string(),
            ident::hash_credential(password),
            full_name.trim().to_string(),
        );
        self.numbers.insert(number.clone(), username.to_string());
        self.accounts.insert(username.to_string(), account);
        info!("registered account {} for '{}'", number, username);

        if opening_deposit.is_positive() {
            self.deposit(username, opening_deposit)?;
        }
        self.persist()?;

        // Safety: inserted above
        Ok(self.accounts[username].clone())
    }

    /// Checks a username/password pair against the registry.
    ///
    /// Unknown username and mismatched password are indistinguishable to the
    /// caller.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        let account = self.accounts.get(username)?;
        if account.password_hash == ident::hash_credential(password) {
            Some(account.clone())
        } else {
            debug!("failed authentication for '{}'", username);
            None
        }
    }

    /// Replaces the account's credential hash.
    ///
    /// Re-authentication with the current password is the caller's
    /// responsibility before invoking this.
    pub fn change_credential(&mut self, username: &str, new_password: &str) -> Result<()> {
        if !ident::valid_password(new_password) {
            return Err(LedgerError::WeakCredential);
        }
        let account = self.account_mut(username)?;
        account.password_hash = ident::hash_credential(new_password);
        self.persist()
    }

    /// Credits `amount` to the account and returns the new balance.
    pub fn deposit(&mut self, username: &str, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }

        let account = self.account_mut(username)?;
        account.credit(amount);
        let balance = account.balance;
        let tx = Transaction::deposit(&account.account_number, amount, balance);

        self.storage.log.append(&tx)?;
        self.persist()?;
        debug!("deposited {} to '{}'", amount, username);
        Ok(balance)
    }

    /// Debits `amount` from the account and returns the new balance.
    pub fn withdraw(&mut self, username: &str, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }

        let account = self.account_mut(username)?;
        if !account.debit(amount) {
            warn!("withdrawal of {} from '{}' rejected: insufficient funds", amount, username);
            return Err(LedgerError::InsufficientFunds);
        }
        let balance = account.balance;
        let tx = Transaction::withdrawal(&account.account_number, amount, balance);

        self.storage.log.append(&tx)?;
        self.persist()?;
        debug!("withdrew {} from '{}'", amount, username);
        Ok(balance)
    }

    /// Moves `amount` between two accounts and returns the new source balance.
    ///
    /// Appends the transfer-out record on the source and the transfer-in
    /// record on the destination, in that order, then persists once covering
    /// both accounts.
    pub fn transfer(
        &mut self,
        from_username: &str,
        to_username: &str,
        amount: Money,
    ) -> Result<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }
        if !self.account_exists(to_username) {
            return Err(LedgerError::RecipientNotFound(to_username.to_string()));
        }
        if from_username == to_username {
            return Err(LedgerError::SelfTransfer);
        }

        let (from_number, from_balance) = {
            let from = self.account_mut(from_username)?;
            if !from.debit(amount) {
                warn!(
                    "transfer of {} from '{}' rejected: insufficient funds",
                    amount, from_username
                );
                return Err(LedgerError::InsufficientFunds);
            }
            (from.account_number.clone(), from.balance)
        };
        let (to_number, to_balance) = {
            // Safety: presence checked above, and nothing is removed between
            let to = self.account_mut(to_username)?;
            to.credit(amount);
            (to.account_number.clone(), to.balance)
        };

        self.storage
            .log
            .append(&Transaction::transfer_out(&from_number, amount, from_balance, &to_number))?;
        self.storage
            .log
            .append(&Transaction::transfer_in(&to_number, amount, to_balance, &from_number))?;
        self.persist()?;
        debug!("transferred {} from '{}' to '{}'", amount, from_username, to_username);
        Ok(from_balance)
    }

    /// Applies daily-prorated interest and returns the credited amount.
    ///
    /// Interest accrues at 4% p.a., divided by 365 per whole day elapsed
    /// since the last application, against the current balance. If the
    /// rounded interest is zero, nothing is recorded and the accrual date is
    /// left where it was so short periods keep accumulating.
    pub fn apply_interest(&mut self, username: &str) -> Result<Money> {
        let today = Local::now().date_naive();

        let (tx, interest) = {
            let account = self.account_mut(username)?;
            if today <= account.last_interest_applied {
                return Ok(Money::ZERO);
            }
            let days = (today - account.last_interest_applied).num_days();
            let accrued = account.balance.as_decimal() * annual_rate() * Decimal::from(days)
                / Decimal::from(DAYS_PER_YEAR);
            let interest = Money::new(accrued);
            if !interest.is_positive() {
                return Ok(Money::ZERO);
            }

            account.credit(interest);
            account.last_interest_applied = today;
            (
                Transaction::interest(&account.account_number, interest, account.balance, days),
                interest,
            )
        };

        self.storage.log.append(&tx)?;
        self.persist()?;
        info!("credited {} interest to '{}'", interest, username);
        Ok(interest)
    }

    /// Returns up to the last `n` transactions for the account, oldest of
    /// the tail first.
    pub fn mini_statement(&self, account_number: &str, n: usize) -> Result<Vec<Transaction>> {
        let mut records = self.full_statement(account_number)?;
        let start = records.len().saturating_sub(n);
        Ok(records.split_off(start))
    }

    /// Returns all transactions for the account in ascending timestamp order.
    pub fn full_statement(&self, account_number: &str) -> Result<Vec<Transaction>> {
        let mut records = self.storage.log.load_for(account_number)?;
        // Stable sort: records within the same second keep append order
        records.sort_by_key(|tx| tx.timestamp);
        Ok(records)
    }
}
