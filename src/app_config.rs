// Centralized configuration management for the PrepDeck backend
// Load ALL env vars ONCE at startup

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Global application configuration loaded once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    // For tests, load .env file first
    #[cfg(test)]
    dotenv::dotenv().ok();

    AppConfig::from_env().expect("Failed to load configuration")
});

/// Access the global configuration
pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub security: SecurityConfig,
    pub features: FeatureConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub environment: Environment,
    pub rust_log: String,
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
    pub idle_timeout: u64,
    pub max_lifetime: u64,
}

/// Token issuance/verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub secret: String,
    pub expiry: u64,
    pub refresh_threshold_minutes: u64,
    pub audience: String,
    pub issuer: String,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
}

/// Feature flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub enable_swagger_ui: bool,
    pub disable_embedded_migrations: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Helper function to get optional env var with default
        let get_or_default = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // Helper function to parse env var with default
        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_bool_or_default = |key: &str, default: &str| -> bool {
            get_or_default(key, default).to_lowercase() == "true"
        };

        // Parse bind address to extract port
        let bind_address = get_or_default("BIND_ADDRESS", "0.0.0.0:8080");
        let port = bind_address
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let environment = Environment::from(get_or_default("ENVIRONMENT", "development"));

        // Token secret validation
        let token_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingVar("JWT_SECRET".to_string()))?;
        if token_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                "Secret must be at least 32 characters long".to_string(),
            ));
        }

        let database_url = Self::resolve_database_url()?;

        let server = ServerConfig {
            bind_address,
            port,
            environment,
            rust_log: get_or_default("RUST_LOG", "info"),
        };

        let database = DatabaseConfig {
            url: database_url,
            max_connections: parse_or_default("DATABASE_MAX_CONNECTIONS", "10")?,
            min_connections: parse_or_default("DATABASE_MIN_CONNECTIONS", "1")?,
            connect_timeout: parse_u64_or_default("DATABASE_CONNECT_TIMEOUT", "10")?,
            idle_timeout: parse_u64_or_default("DATABASE_IDLE_TIMEOUT", "30")?,
            max_lifetime: parse_u64_or_default("DATABASE_MAX_LIFETIME", "1800")?,
        };

        let token = TokenConfig {
            secret: token_secret,
            expiry: parse_u64_or_default("JWT_EXPIRY", "604800")?,
            refresh_threshold_minutes: parse_u64_or_default("JWT_REFRESH_THRESHOLD_MINUTES", "60")?,
            audience: get_or_default("JWT_AUDIENCE", "prepdeck-users"),
            issuer: get_or_default("JWT_ISSUER", "prepdeck-app"),
        };

        let security = SecurityConfig {
            bcrypt_cost: parse_or_default("BCRYPT_COST", "12")?,
            cors_allowed_origins: get_or_default("CORS_ALLOWED_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
        };

        let features = FeatureConfig {
            enable_swagger_ui: parse_bool_or_default("ENABLE_SWAGGER_UI", "false"),
            disable_embedded_migrations: parse_bool_or_default(
                "DISABLE_EMBEDDED_MIGRATIONS",
                "false",
            ),
        };

        Ok(AppConfig {
            server,
            database,
            token,
            security,
            features,
        })
    }

    /// Resolve the database connection string: DATABASE_URL takes precedence,
    /// falling back to discrete DB_* parameters
    fn resolve_database_url() -> Result<String, ConfigError> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        let required = ["DB_USER", "DB_PASSWORD", "DB_HOST", "DB_NAME"];
        let missing: Vec<&str> = required
            .iter()
            .filter(|key| env::var(key).is_err())
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVar(missing.join(", ")));
        }

        let user = env::var("DB_USER").unwrap_or_default();
        let password = env::var("DB_PASSWORD").unwrap_or_default();
        let host = env::var("DB_HOST").unwrap_or_default();
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let name = env::var("DB_NAME").unwrap_or_default();

        Ok(format!(
            "postgresql://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }

    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}
