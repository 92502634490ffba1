// Authentication-specific error handling utilities

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::token::TokenError;

/// Authentication-specific errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Token generation failed: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    InternalError,
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        // Verification failures all collapse to one client-visible message
        AuthError::InvalidToken
    }
}

/// Standard authentication response structure
#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub description: String,
}

impl AuthError {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::EmailTaken => "EMAIL_TAKEN",
            AuthError::ValidationError(_) => "VALIDATION_ERROR",
            AuthError::TokenError(_) => "TOKEN_ERROR",
            AuthError::DatabaseError(_) => "DATABASE_ERROR",
            AuthError::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message; 5xx variants never leak internals
    pub fn public_message(&self) -> String {
        match self {
            AuthError::TokenError(_) | AuthError::DatabaseError(_) | AuthError::InternalError => {
                "Internal server error".to_string()
            },
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = self.public_message();
        let response = AuthErrorResponse {
            success: false,
            error: ErrorDetail {
                code: self.error_code().to_string(),
                description: message.clone(),
            },
            message,
        };

        (status, Json(response)).into_response()
    }
}

/// Helper function to log authentication failures
pub fn log_auth_failure(user_email: &str, error: &AuthError) {
    tracing::warn!(
        email = user_email,
        error_code = error.error_code(),
        "Authentication failure"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_contract() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DatabaseError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = AuthError::DatabaseError("password column corrupt".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = AuthError::TokenError("bad key material".into());
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_token_error_collapses_to_invalid_token() {
        let from_expired: AuthError = TokenError::TokenExpired.into();
        let from_invalid: AuthError = TokenError::InvalidToken.into();
        assert_eq!(from_expired.error_code(), "INVALID_TOKEN");
        assert_eq!(from_invalid.error_code(), "INVALID_TOKEN");
    }
}
