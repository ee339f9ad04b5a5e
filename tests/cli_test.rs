//! Integration tests for the passbook CLI.
//!
//! Each test runs the actual binary against a throwaway data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn passbook(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("passbook").unwrap();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn register_alice(data_dir: &Path) {
    passbook(data_dir)
        .args([
            "register",
            "--username",
            "alice",
            "--name",
            "Alice A",
            "--password",
            "secret1",
            "--opening",
            "100.00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created!"));
}

#[test]
fn test_register_and_login() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    passbook(dir.path())
        .args(["login", "--username", "alice", "--password", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Alice A!"))
        .stdout(predicate::str::contains("Balance: 100.00"));
}

#[test]
fn test_login_rejects_bad_credentials() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    passbook(dir.path())
        .args(["login", "--username", "alice", "--password", "wrong66"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));
}

#[test]
fn test_register_rejects_weak_password() {
    let dir = tempdir().unwrap();

    passbook(dir.path())
        .args([
            "register",
            "--username",
            "alice",
            "--name",
            "Alice A",
            "--password",
            "short",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password too weak"));
}

#[test]
fn test_deposit_withdraw_and_statement() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    passbook(dir.path())
        .args([
            "deposit",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--amount",
            "50.00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: 150.00"));

    passbook(dir.path())
        .args([
            "withdraw",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--amount",
            "200.00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient funds"));

    passbook(dir.path())
        .args([
            "statement",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--last",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEPOSIT"))
        .stdout(predicate::str::contains("150.00"))
        .stdout(predicate::str::contains("Cash/Online Deposit"));
}

#[test]
fn test_transfer_between_users() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    passbook(dir.path())
        .args([
            "register",
            "--username",
            "bob1",
            "--name",
            "Bob B",
            "--password",
            "secret2",
        ])
        .assert()
        .success();

    passbook(dir.path())
        .args([
            "transfer",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--to",
            "bob1",
            "--amount",
            "60.00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transferred 60.00 to bob1"))
        .stdout(predicate::str::contains("Balance: 40.00"));

    passbook(dir.path())
        .args(["login", "--username", "bob1", "--password", "secret2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: 60.00"));

    passbook(dir.path())
        .args(["statement", "--username", "bob1", "--password", "secret2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TRANSFER_IN"));
}

#[test]
fn test_statement_bare_last_defaults_to_five() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    for amount in ["1.00", "2.00", "3.00", "4.00", "5.00"] {
        passbook(dir.path())
            .args([
                "deposit",
                "--username",
                "alice",
                "--password",
                "secret1",
                "--amount",
                amount,
            ])
            .assert()
            .success();
    }

    // Six records exist; bare --last shows the header plus the last five,
    // so the opening deposit of 100.00 falls off.
    passbook(dir.path())
        .args([
            "statement",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--last",
        ])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| out.lines().count() == 6))
        .stdout(predicate::str::contains("115.00"))
        .stdout(predicate::str::contains("100.00").not());
}

#[test]
fn test_rejects_invalid_amount_input() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    for bad in ["abc", "0"] {
        passbook(dir.path())
            .args([
                "deposit",
                "--username",
                "alice",
                "--password",
                "secret1",
                "--amount",
                bad,
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("amount must be greater than zero"));
    }
}

#[test]
fn test_passwd_changes_credential() {
    let dir = tempdir().unwrap();
    register_alice(dir.path());

    passbook(dir.path())
        .args([
            "passwd",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--new-password",
            "newsecret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password changed successfully."));

    passbook(dir.path())
        .args(["login", "--username", "alice", "--password", "secret1"])
        .assert()
        .failure();

    passbook(dir.path())
        .args(["login", "--username", "alice", "--password", "newsecret"])
        .assert()
        .success();
}
