//! Passbook CLI
//!
//! A command-line consumer for the ledger: each invocation loads the stores,
//! runs one named operation, and persists before exiting.
//!
//! # Usage
//!
//! ```bash
//! passbook register --username alice --name "Alice A" --password secret1 --opening 100.00
//! passbook deposit --username alice --password secret1 --amount 50.00
//! passbook statement --username alice --password secret1 --last 5
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::{Parser, Subcommand};
use passbook::{Account, Bank, LedgerError, Money, Result, Transaction};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "passbook", version, about = "A small personal banking ledger")]
struct Cli {
    /// Directory holding accounts.csv and transactions.csv
    #[arg(long, default_value = "bank_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account
    Register {
        #[arg(long)]
        username: String,
        /// Full display name
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// Optional opening deposit
        #[arg(long, default_value = "0")]
        opening: String,
    },
    /// Verify credentials and show the account summary
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Deposit money
    Deposit {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        amount: String,
    },
    /// Withdraw money
    Withdraw {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        amount: String,
    },
    /// Transfer money to another user
    Transfer {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Recipient username
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
    },
    /// Apply accrued interest
    Interest {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show the transaction statement
    Statement {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Show only the last N transactions (mini statement); bare `--last` means 5
        #[arg(long, num_args = 0..=1, default_missing_value = "5")]
        last: Option<usize>,
    },
    /// Change the account password
    Passwd {
        #[arg(long)]
        username: String,
        /// Current password
        #[arg(long)]
        password: String,
        #[arg(long)]
        new_password: String,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut bank = Bank::open(&cli.data_dir)?;

    match cli.command {
        Command::Register {
            username,
            name,
            password,
            opening,
        } => {
            let opening = parse_non_negative(&opening)?;
            let account = bank.register(&username, &name, &password, opening)?;
            println!("Account created! Account No: {}", account.account_number);
            println!("Balance: {}", account.balance);
        }
        Command::Login { username, password } => {
            let account = login(&bank, &username, &password)?;
            println!("Welcome, {}!", account.full_name);
            println!("Account: {}", account.account_number);
            println!("Balance: {}", account.balance);
        }
        Command::Deposit {
            username,
            password,
            amount,
        } => {
            login(&bank, &username, &password)?;
            let amount = parse_positive(&amount)?;
            let balance = bank.deposit(&username, amount)?;
            println!("Deposited {}", amount);
            println!("Balance: {}", balance);
        }
        Command::Withdraw {
            username,
            password,
            amount,
        } => {
            login(&bank, &username, &password)?;
            let amount = parse_positive(&amount)?;
            let balance = bank.withdraw(&username, amount)?;
            println!("Withdrew {}", amount);
            println!("Balance: {}", balance);
        }
        Command::Transfer {
            username,
            password,
            to,
            amount,
        } => {
            login(&bank, &username, &password)?;
            let amount = parse_positive(&amount)?;
            let balance = bank.transfer(&username, &to, amount)?;
            println!("Transferred {} to {}", amount, to);
            println!("Balance: {}", balance);
        }
        Command::Interest { username, password } => {
            let account = login(&bank, &username, &password)?;
            let interest = bank.apply_interest(&username)?;
            println!("Interest added: {}", interest);
            println!("Balance: {}", account.balance + interest);
        }
        Command::Statement {
            username,
            password,
            last,
        } => {
            let account = login(&bank, &username, &password)?;
            let records = match last {
                Some(n) => bank.mini_statement(&account.account_number, n)?,
                None => bank.full_statement(&account.account_number)?,
            };
            print_statement(&records);
        }
        Command::Passwd {
            username,
            password,
            new_password,
        } => {
            login(&bank, &username, &password)?;
            bank.change_credential(&username, &new_password)?;
            println!("Password changed successfully.");
        }
    }

    bank.persist()
}

fn login(bank: &Bank, username: &str, password: &str) -> Result<Account> {
    bank.authenticate(username, password)
        .ok_or(LedgerError::InvalidCredentials)
}

/// Parses a caller-supplied amount, rejecting non-numeric or non-positive input.
fn parse_positive(input: &str) -> Result<Money> {
    let amount = Money::from_str(input).map_err(|_| LedgerError::InvalidAmount)?;
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(amount)
}

/// Parses an opening deposit, which may be zero.
fn parse_non_negative(input: &str) -> Result<Money> {
    let amount = Money::from_str(input).map_err(|_| LedgerError::InvalidAmount)?;
    if amount < Money::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(amount)
}

fn print_statement(records: &[Transaction]) {
    println!(
        "{:<19}  {:<12}  {:>12}  {:>12}  {:<14}  {}",
        "TIME", "TYPE", "AMOUNT", "BALANCE", "RELATED", "DETAILS"
    );
    for tx in records {
        println!(
            "{:<19}  {:<12}  {:>12}  {:>12}  {:<14}  {}",
            tx.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            tx.kind.to_string(),
            tx.amount.to_string(),
            tx.balance_after.to_string(),
            tx.related_account.as_deref().unwrap_or(""),
            tx.details
        );
    }
}
