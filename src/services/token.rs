// Token issuance and verification service
// HS256 tokens carrying user identity claims with a 7-day expiry

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::models::auth::TokenClaims;

// Error types for token operations
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token encoding error: {0}")]
    EncodingError(String),

    #[error("Clock error: {0}")]
    ClockError(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidIssuer => TokenError::InvalidToken,
            _ => TokenError::EncodingError(err.to_string()),
        }
    }
}

// Token configuration with a single signing key
#[derive(Clone)]
pub struct TokenConfig {
    pub expiry: u64, // 7 days in seconds
    pub algorithm: Algorithm,

    // Token validation settings
    pub audience: String,
    pub issuer: String,

    // Advisory refresh window: reissue when remaining lifetime drops below this
    pub refresh_threshold_minutes: u64,

    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("expiry", &self.expiry)
            .field("algorithm", &self.algorithm)
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("refresh_threshold_minutes", &self.refresh_threshold_minutes)
            .field("encoding_key", &"<redacted>")
            .field("decoding_key", &"<redacted>")
            .finish()
    }
}

impl TokenConfig {
    /// Build token config from provided parameters - shared logic for from_env and for_test
    fn build_from_params(
        secret: &str,
        expiry: u64,
        refresh_threshold_minutes: u64,
        audience: String,
        issuer: String,
    ) -> Self {
        TokenConfig {
            expiry,
            algorithm: Algorithm::HS256,
            audience,
            issuer,
            refresh_threshold_minutes,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create token config from centralized app configuration
    pub fn from_env() -> Self {
        let crate::app_config::TokenConfig {
            secret,
            expiry,
            refresh_threshold_minutes,
            audience,
            issuer,
        } = &crate::app_config::config().token;

        Self::build_from_params(
            secret,
            *expiry,
            *refresh_threshold_minutes,
            audience.clone(),
            issuer.clone(),
        )
    }

    /// Create token config for tests without touching the environment
    #[cfg(test)]
    pub fn for_test() -> Self {
        Self::build_from_params(
            "test-secret-hs256-minimum-32-characters-long",
            604_800, // 7 days
            60,
            "test-prepdeck-users".to_string(),
            "test-prepdeck-app".to_string(),
        )
    }
}

// Token service
pub struct TokenService {
    config: TokenConfig,
}

impl TokenService {
    /// Create new token service with configuration
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Create token service from environment
    pub fn from_env() -> Self {
        Self::new(TokenConfig::from_env())
    }

    /// Generate a signed token for a user
    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TokenError::ClockError(e.to_string()))?
            .as_secs();

        let claims = TokenClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
            iat: now,
            exp: now + self.config.expiry,
        };

        let header = Header::new(self.config.algorithm);
        encode(&header, &claims, &self.config.encoding_key).map_err(Into::into)
    }

    /// Validates a token and returns the decoded claims
    ///
    /// Checks signature, expiry (zero leeway), audience and issuer. Any
    /// mismatch surfaces as `TokenExpired` or `InvalidToken`, which route
    /// handlers collapse into the single "Invalid or expired token" reply.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.set_audience(&[self.config.audience.clone()]);
        validation.set_issuer(&[self.config.issuer.clone()]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let token_data = decode::<TokenClaims>(token, &self.config.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Decode a token without verification.
    ///
    /// Diagnostics only: the result MUST NOT be trusted for authorization
    /// decisions. Returns `None` for anything that is not a well-formed JWT.
    pub fn decode_unverified(token: &str) -> Option<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Check whether a token is past its expiry.
    /// Undecodable tokens count as expired.
    pub fn is_expired(token: &str) -> bool {
        match Self::decode_unverified(token) {
            Some(claims) => claims.is_expired(),
            None => true,
        }
    }

    /// Advisory check: should this token be proactively reissued?
    /// True when remaining lifetime is below the configured threshold, and
    /// for anything that cannot be decoded.
    pub fn should_refresh(&self, token: &str) -> bool {
        self.should_refresh_with_threshold(token, self.config.refresh_threshold_minutes)
    }

    /// Advisory refresh check with an explicit threshold in minutes
    pub fn should_refresh_with_threshold(&self, token: &str, threshold_minutes: u64) -> bool {
        match Self::decode_unverified(token) {
            Some(claims) => claims.remaining_seconds() < threshold_minutes * 60,
            None => true,
        }
    }

    /// Configured token lifetime in seconds
    pub fn expiry_seconds(&self) -> u64 {
        self.config.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let service = TokenService::new(TokenConfig::for_test());

        let token = service
            .generate_token(
                "7b6b1b1e-1111-4222-8333-444455556666",
                "test@example.com",
                "Test",
                "User",
            )
            .unwrap();

        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_token_verification_returns_identity_claims() {
        let service = TokenService::new(TokenConfig::for_test());

        let token = service
            .generate_token(
                "7b6b1b1e-1111-4222-8333-444455556666",
                "test@example.com",
                "Test",
                "User",
            )
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, "7b6b1b1e-1111-4222-8333-444455556666");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.first_name, "Test");
        assert_eq!(claims.last_name, "User");
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_decode_unverified_ignores_signature() {
        let service = TokenService::new(TokenConfig::for_test());
        let token = service
            .generate_token("id", "a@b.com", "A", "B")
            .unwrap();

        // Corrupt the signature; unverified decode still yields claims
        let mut parts: Vec<&str> = token.split('.').collect();
        let tampered_sig = "AAAAAAAAAAAAAAAAAAAAAA";
        parts[2] = tampered_sig;
        let tampered = parts.join(".");

        assert!(service.verify_token(&tampered).is_err());
        let claims = TokenService::decode_unverified(&tampered).unwrap();
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn test_should_refresh_threshold() {
        let service = TokenService::new(TokenConfig::for_test());
        let token = service
            .generate_token("id", "a@b.com", "A", "B")
            .unwrap();

        // Fresh 7-day token: not below a 60-minute threshold
        assert!(!service.should_refresh(&token));
        // But below an absurdly large threshold
        assert!(service.should_refresh_with_threshold(&token, 8 * 24 * 60));
        // Garbage always advises refresh
        assert!(service.should_refresh("not-a-token"));
    }

    #[test]
    fn test_is_expired_for_garbage_input() {
        assert!(TokenService::is_expired("not-a-token"));
        assert!(TokenService::is_expired(""));
    }
}
