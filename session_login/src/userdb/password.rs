//! Argon2id password hashing
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`) in the
//! `password_hash` column of the users table.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::UserError;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserError::Password(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string.
///
/// A malformed stored hash never verifies.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// [`hash_password`] on the blocking thread pool
pub(crate) async fn hash_password_blocking(password: &str) -> Result<String, UserError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| UserError::Password(format!("Hashing task failed: {e}")))?
}

/// [`verify_password`] on the blocking thread pool
pub(crate) async fn verify_password_blocking(password: &str, hash: &str) -> bool {
    let (password, hash) = (password.to_string(), hash.to_string());
    match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await {
        Ok(verified) => verified,
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    }
}
