//! Immutable transaction records and their per-kind constructors.

use crate::ident;
use crate::money::Money;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of money movement a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxKind {
    /// Funds credited from outside the ledger.
    Deposit,

    /// Funds debited to outside the ledger.
    Withdrawal,

    /// Credit side of an internal transfer.
    TransferIn,

    /// Debit side of an internal transfer.
    TransferOut,

    /// Accrued interest credit.
    Interest,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxKind::Deposit => "DEPOSIT",
            TxKind::Withdrawal => "WITHDRAWAL",
            TxKind::TransferIn => "TRANSFER_IN",
            TxKind::TransferOut => "TRANSFER_OUT",
            TxKind::Interest => "INTEREST",
        };
        f.write_str(name)
    }
}

/// One money movement against exactly one account.
///
/// Created once, appended to the log, never mutated or deleted.
/// Field order and camelCase renames match the log row format:
/// `id,timestamp,accountNumber,type,amount,balanceAfter,details,relatedAccount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique opaque id.
    pub id: String,

    /// Local date-time at second resolution.
    pub timestamp: NaiveDateTime,

    /// Account the movement belongs to.
    pub account_number: String,

    /// Movement kind.
    #[serde(rename = "type")]
    pub kind: TxKind,

    /// Moved amount, always positive.
    pub amount: Money,

    /// Owning account's balance immediately after the movement.
    pub balance_after: Money,

    /// Free-text description.
    pub details: String,

    /// Counterparty account number for transfers, empty otherwise.
    pub related_account: Option<String>,
}

impl Transaction {
    fn new(
        account_number: &str,
        kind: TxKind,
        amount: Money,
        balance_after: Money,
        details: String,
        related_account: Option<String>,
    ) -> Self {
        Transaction {
            id: ident::record_id(),
            timestamp: now(),
            account_number: account_number.to_string(),
            kind,
            amount,
            balance_after,
            details,
            related_account,
        }
    }

    /// Record for a cash/online deposit.
    pub fn deposit(account_number: &str, amount: Money, balance_after: Money) -> Self {
        Transaction::new(
            account_number,
            TxKind::Deposit,
            amount,
            balance_after,
            "Cash/Online Deposit".to_string(),
            None,
        )
    }

    /// Record for a cash withdrawal.
    pub fn withdrawal(account_number: &str, amount: Money, balance_after: Money) -> Self {
        Transaction::new(
            account_number,
            TxKind::Withdrawal,
            amount,
            balance_after,
            "Cash Withdrawal".to_string(),
            None,
        )
    }

    /// Debit-side record of a transfer, referencing the destination account.
    pub fn transfer_out(
        account_number: &str,
        amount: Money,
        balance_after: Money,
        to_account: &str,
    ) -> Self {
        Transaction::new(
            account_number,
            TxKind::TransferOut,
            amount,
            balance_after,
            format!("Transfer to {}", to_account),
            Some(to_account.to_string()),
        )
    }

    /// Credit-side record of a transfer, referencing the source account.
    pub fn transfer_in(
        account_number: &str,
        amount: Money,
        balance_after: Money,
        from_account: &str,
    ) -> Self {
        Transaction::new(
            account_number,
            TxKind::TransferIn,
            amount,
            balance_after,
            format!("Transfer from {}", from_account),
            Some(from_account.to_string()),
        )
    }

    /// Record for an interest credit, noting the day count in the details.
    pub fn interest(account_number: &str, amount: Money, balance_after: Money, days: i64) -> Self {
        Transaction::new(
            account_number,
            TxKind::Interest,
            amount,
            balance_after,
            format!("Interest for {} day(s)", days),
            None,
        )
    }
}

/// Current local time, truncated to whole seconds.
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
