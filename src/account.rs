//! Account model and balance operations.
//!
//! Maintains the invariant: the balance is always rounded to 2 decimal
//! places and never goes negative through `debit`.

use crate::money::Money;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A customer account.
///
/// Field order and camelCase renames match the snapshot row format:
/// `accountNumber,username,passwordHash,fullName,balance,lastInterestApplied,createdAt`.
///
/// # Invariants
///
/// - `balance` holds exactly 2 decimal places after every operation
/// - `balance` never becomes negative through `debit`
/// - `last_interest_applied` is monotonically non-decreasing
///
/// Accounts are created once at registration and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// System-generated, globally unique.
    pub account_number: String,

    /// Caller-chosen, globally unique.
    pub username: String,

    /// Hex-encoded SHA-256 of the raw password.
    pub password_hash: String,

    /// Display name, free text.
    pub full_name: String,

    /// Current balance, 2 decimal places.
    pub balance: Money,

    /// Date interest was last credited. Interest accrues from this date.
    pub last_interest_applied: NaiveDate,

    /// Registration date.
    pub created_at: NaiveDate,
}

impl Account {
    /// Creates a new account with a zero balance, dated today.
    pub fn new(
        account_number: String,
        username: String,
        password_hash: String,
        full_name: String,
    ) -> Self {
        let today = Local::now().date_naive();
        Account {
            account_number,
            username,
            password_hash,
            full_name,
            balance: Money::ZERO,
            last_interest_applied: today,
            created_at: today,
        }
    }

    /// Credits funds to the account.
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Debits funds from the account.
    ///
    /// Returns `false` without mutating if `amount` exceeds the balance.
    pub fn debit(&mut self, amount: Money) -> bool {
        if amount > self.balance {
            return false;
        }
        self.balance -= amount;
        true
    }
}
