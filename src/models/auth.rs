// Authentication models for the PrepDeck backend
// Wire-format claim names are camelCase to match the web client

use serde::{Deserialize, Serialize};

/// Token claims structure
/// Carries user identity plus standard audience/issuer/expiry claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// User ID (UUID string)
    #[serde(rename = "userId")]
    pub user_id: String,

    /// User email address
    pub email: String,

    /// User first name
    #[serde(rename = "firstName")]
    pub first_name: String,

    /// User last name
    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Audience (aud)
    pub aud: String,

    /// Issuer (iss)
    pub iss: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: u64,

    /// Expires at timestamp (Unix epoch seconds)
    pub exp: u64,
}

impl TokenClaims {
    /// Create new token claims
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        email: String,
        first_name: String,
        last_name: String,
        audience: String,
        issuer: String,
        issued_at: u64,
        expires_at: u64,
    ) -> Self {
        Self {
            user_id,
            email,
            first_name,
            last_name,
            aud: audience,
            iss: issuer,
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Check if the claims are past their expiry
    pub fn is_expired(&self) -> bool {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.exp < now
    }

    /// Remaining lifetime in seconds (zero if already expired)
    pub fn remaining_seconds(&self) -> u64 {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.exp.saturating_sub(now)
    }
}
