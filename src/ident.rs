//! Identifier generation, credential hashing, and input shape validation.

use chrono::Local;
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generates an account number: current year-month plus a random 6-digit suffix.
///
/// Example: `202608734519`. The suffix is not checked for uniqueness here;
/// the registry retries on collision before assigning the number.
pub fn account_number() -> String {
    let yyyymm = Local::now().format("%Y%m");
    let suffix: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    format!("{}{}", yyyymm, suffix)
}

/// Generates a unique opaque id for a transaction record.
pub fn record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Hashes a raw credential with SHA-256, hex-encoded.
///
/// Deliberately unsalted and single-pass: this mirrors the hash-and-compare
/// interface of the stored format and is not a production password scheme.
pub fn hash_credential(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Username shape check: 4 to 16 ASCII alphanumeric characters.
pub fn valid_username(username: &str) -> bool {
    (4..=16).contains(&username.len())
        && username.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Password shape check: at least 6 characters.
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 6
}
