// SPDX-License-Identifier: MIT

//! Password digest and verification (Argon2).
//!
//! Treated as an opaque one-way digest + verify capability; no
//! complexity policy is enforced here.

use crate::error::AppError;
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::sync::LazyLock;

/// A real Argon2 hash generated once at startup, used as a timing decoy
/// so that login requests for non-existent users take the same time as
/// requests for existing users.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"dummy-never-matches", &salt)
        .expect("failed to generate dummy hash")
        .to_string()
});

/// Hash a password into a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC digest.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Perform a throwaway verification to equalize response timing when the
/// target account does not exist or has no password digest.
pub fn dummy_verify(password: &str) {
    if let Ok(hash) = PasswordHash::new(&DUMMY_HASH) {
        let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
    }
}
