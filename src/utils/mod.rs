// Utility modules for the PrepDeck backend

pub mod auth_errors;
pub mod password;
pub mod validation;

pub use auth_errors::{log_auth_failure, AuthError, AuthErrorResponse};
pub use password::{hash_password, hash_password_with_cost, verify_password, PasswordError};
pub use validation::{
    is_valid_email, is_valid_phone, trim_and_validate_field, trim_optional_field,
};
