//! Password hashing.
//!
//! Bcrypt with a configurable cost factor. Token sealing lives in
//! [`crate::token`]; this module only deals with user credentials.

use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::AuthError;
use crate::observability::metrics::record_bcrypt_duration;
use std::time::Instant;
use tracing::instrument;

/// Hash a user password with bcrypt.
///
/// # Errors
///
/// Returns `AuthError::Crypto` if:
/// - `cost` is outside `MIN_BCRYPT_COST..=MAX_BCRYPT_COST`
/// - bcrypt hashing fails
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    // Config validates the cost too; this guards direct callers.
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(AuthError::Crypto(format!(
            "Invalid bcrypt cost: {} (must be {}-{})",
            cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }

    let start = Instant::now();
    let hash = bcrypt::hash(password, cost)
        .map_err(|e| AuthError::Crypto(format!("Password hashing failed: {}", e)))?;
    record_bcrypt_duration("hash", start.elapsed());

    Ok(hash)
}

/// Check `password` against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash is
/// unusable.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let start = Instant::now();
    let matches = bcrypt::verify(password, hash)
        .map_err(|e| AuthError::Crypto(format!("Password verification failed: {}", e)))?;
    record_bcrypt_duration("verify", start.elapsed());

    Ok(matches)
}
