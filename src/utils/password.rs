// Password hashing and verification utilities using bcrypt

use thiserror::Error;

/// Errors that can occur during password operations
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingError(String),

    #[error("Failed to verify password: {0}")]
    VerificationError(String),

    #[error("Invalid bcrypt cost {0}: must be between 4 and 31")]
    InvalidCost(u32),
}

/// Hash a password using bcrypt with the configured cost factor
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, crate::app_config::config().security.bcrypt_cost)
}

/// Hash a password using bcrypt with an explicit cost factor
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    if !(4..=31).contains(&cost) {
        return Err(PasswordError::InvalidCost(cost));
    }

    bcrypt::hash(password, cost).map_err(|e| PasswordError::HashingError(e.to_string()))
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::VerificationError(e.to_string()))
}
