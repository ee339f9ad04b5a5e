//! Error types for the ledger.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operation.
///
/// Validation and state-conflict variants are recoverable and leave no state
/// mutated. `Io` and `Csv` are storage errors: fatal for the operation in
/// progress, and memory may already be ahead of disk when they surface.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Amount was zero or negative
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Withdrawal or transfer larger than the current balance
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Username already registered
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Username failed the shape check
    #[error("username must be 4-16 alphanumeric characters")]
    InvalidUsername(String),

    /// Display name was blank
    #[error("full name is required")]
    EmptyName,

    /// Password shorter than the minimum
    #[error("password too weak (minimum 6 characters)")]
    WeakCredential,

    /// Transfer destination username is not registered
    #[error("recipient '{0}' not found")]
    RecipientNotFound(String),

    /// Transfer source and destination are the same account
    #[error("cannot transfer to your own account")]
    SelfTransfer,

    /// Operation referenced a username with no account
    #[error("no account registered for '{0}'")]
    AccountNotFound(String),

    /// Unknown username or mismatched password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Failed to read or write a backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed row in a backing file, or CSV encoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
