//! Service configuration.
//!
//! Loaded once from environment variables at startup. There is no runtime
//! reconfiguration; a new key means a restart.

use chrono::Duration;
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:4000";

/// Default access token lifetime in seconds (one hour).
pub const DEFAULT_ACCESS_TOKEN_DURATION_SECONDS: i64 = 3600;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Minimum accepted bcrypt cost.
pub const MIN_BCRYPT_COST: u32 = 10;

/// Maximum accepted bcrypt cost.
pub const MAX_BCRYPT_COST: u32 = 14;

/// Auth service configuration.
///
/// The database URL and the token key are redacted in Debug output.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Server bind address (default: "0.0.0.0:4000").
    pub bind_address: String,

    /// Symmetric key for sealing access tokens. Must be exactly 32 bytes;
    /// the length is checked when the token maker is built.
    pub token_symmetric_key: SecretString,

    /// Lifetime of issued access tokens.
    pub access_token_duration: Duration,

    /// Bcrypt cost factor for password hashing.
    pub bcrypt_cost: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("token_symmetric_key", &"[REDACTED]")
            .field(
                "access_token_duration_seconds",
                &self.access_token_duration.num_seconds(),
            )
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid access token duration: {0}")]
    InvalidTokenDuration(String),

    #[error("Invalid bcrypt cost configuration: {0}")]
    InvalidBcryptCost(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let token_symmetric_key = vars
            .get("TOKEN_SYMMETRIC_KEY")
            .map(|key| SecretString::from(key.as_str()))
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_SYMMETRIC_KEY".to_string()))?;

        let access_token_duration =
            if let Some(value_str) = vars.get("ACCESS_TOKEN_DURATION_SECONDS") {
                let seconds: i64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidTokenDuration(format!(
                        "ACCESS_TOKEN_DURATION_SECONDS must be a valid integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if seconds <= 0 {
                    return Err(ConfigError::InvalidTokenDuration(format!(
                        "ACCESS_TOKEN_DURATION_SECONDS must be positive, got {}",
                        seconds
                    )));
                }

                Duration::try_seconds(seconds).ok_or_else(|| {
                    ConfigError::InvalidTokenDuration(format!(
                        "ACCESS_TOKEN_DURATION_SECONDS is out of range, got {}",
                        seconds
                    ))
                })?
            } else {
                Duration::seconds(DEFAULT_ACCESS_TOKEN_DURATION_SECONDS)
            };

        let bcrypt_cost = if let Some(value_str) = vars.get("BCRYPT_COST") {
            let cost: u32 = value_str.parse().map_err(|e| {
                ConfigError::InvalidBcryptCost(format!(
                    "BCRYPT_COST must be a valid integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                return Err(ConfigError::InvalidBcryptCost(format!(
                    "BCRYPT_COST must be between {} and {}, got {}",
                    MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
                )));
            }

            cost
        } else {
            DEFAULT_BCRYPT_COST
        };

        Ok(Config {
            database_url,
            bind_address,
            token_symmetric_key,
            access_token_duration,
            bcrypt_cost,
        })
    }
}
