//! Password hashing.
//!
//! Argon2id with a fresh random salt per credential. The digest string embeds the algorithm,
//! parameters and salt, so verification needs nothing but the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Constant-time comparison against a stored digest. An unparseable digest counts as a mismatch
/// rather than an error, so callers cannot distinguish a corrupt row from a wrong password.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}
