//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use thiserror::Error;

/// Default token issuer (`iss` claim)
pub const DEFAULT_ISSUER: &str = "postbug-api";

/// Default access token lifetime in milliseconds (1 hour)
pub const DEFAULT_TOKEN_TTL_MS: u64 = 3_600_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer (got {value:?})")]
    InvalidNumber { name: &'static str, value: String },
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// `iss` claim written into and required from access tokens
    pub issuer: String,
    /// Access token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            token_ttl: Duration::from_millis(DEFAULT_TOKEN_TTL_MS),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Read `JWT_ISSUER`, `JWT_EXPIRATION_MS` and `PASSWORD_PEPPER`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let issuer = lookup("JWT_ISSUER")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.issuer);

        let token_ttl = match lookup("JWT_EXPIRATION_MS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "JWT_EXPIRATION_MS",
                        value,
                    });
                }
            },
            None => defaults.token_ttl,
        };

        let password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|v| !v.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            issuer,
            token_ttl,
            password_pepper,
        })
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
