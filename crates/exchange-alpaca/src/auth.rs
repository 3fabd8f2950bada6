//! API key authentication for Alpaca.
//!
//! Alpaca authenticates every request with two headers carrying the key ID
//! and secret. Both are read from the environment; the secret is held in a
//! [`SecretString`] and never appears in `Debug` output or logs.

use crate::error::{AlpacaError, Result};
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

pub const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
pub const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// Environment variable names holding the credentials.
#[derive(Debug, Clone)]
pub struct AlpacaAuthConfig {
    pub key_id_env: String,
    pub secret_key_env: String,
}

impl Default for AlpacaAuthConfig {
    fn default() -> Self {
        Self {
            key_id_env: "APCA_API_KEY_ID".to_string(),
            secret_key_env: "APCA_API_SECRET_KEY".to_string(),
        }
    }
}

impl AlpacaAuthConfig {
    #[must_use]
    pub fn with_env_vars(
        mut self,
        key_id_env: impl Into<String>,
        secret_key_env: impl Into<String>,
    ) -> Self {
        self.key_id_env = key_id_env.into();
        self.secret_key_env = secret_key_env.into();
        self
    }
}

/// Key ID and secret for the `APCA-API-*` headers.
pub struct AlpacaCredentials {
    key_id: String,
    secret_key: SecretString,
}

impl std::fmt::Debug for AlpacaCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaCredentials")
            .field("key_id", &self.key_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl Drop for AlpacaCredentials {
    fn drop(&mut self) {
        self.key_id.zeroize();
    }
}

impl AlpacaCredentials {
    /// # Errors
    /// Returns [`AlpacaError::Configuration`] if either value is blank.
    pub fn new(key_id: impl Into<String>, secret_key: SecretString) -> Result<Self> {
        let key_id = key_id.into();
        if key_id.trim().is_empty() || secret_key.expose_secret().trim().is_empty() {
            return Err(AlpacaError::Configuration(
                "API key ID and secret must not be empty".to_string(),
            ));
        }
        Ok(Self { key_id, secret_key })
    }

    /// Reads both credentials from the environment.
    ///
    /// # Errors
    /// Returns [`AlpacaError::Configuration`] naming the missing variable.
    pub fn from_env(config: &AlpacaAuthConfig) -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| {
                AlpacaError::Configuration(format!("missing environment variable: {name}"))
            })
        };
        let key_id = read(&config.key_id_env)?;
        let secret = read(&config.secret_key_env)?;
        Self::new(key_id, SecretString::from(secret))
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Header name/value pairs for an authenticated request.
    #[must_use]
    pub fn as_tuples(&self) -> [(&'static str, &str); 2] {
        [
            (KEY_ID_HEADER, &self.key_id),
            (SECRET_KEY_HEADER, self.secret_key.expose_secret()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_env_names() {
        let config = AlpacaAuthConfig::default();
        assert_eq!(config.key_id_env, "APCA_API_KEY_ID");
        assert_eq!(config.secret_key_env, "APCA_API_SECRET_KEY");
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = AlpacaCredentials::new("PKTEST", SecretString::from("s3cr3t")).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("PKTEST"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn headers_carry_both_values() {
        let creds = AlpacaCredentials::new("PKTEST", SecretString::from("s3cr3t")).unwrap();
        let tuples = creds.as_tuples();
        assert_eq!(tuples[0], ("APCA-API-KEY-ID", "PKTEST"));
        assert_eq!(tuples[1], ("APCA-API-SECRET-KEY", "s3cr3t"));
    }

    #[test]
    fn blank_credentials_rejected() {
        assert!(AlpacaCredentials::new("", SecretString::from("x")).is_err());
        assert!(AlpacaCredentials::new("PK", SecretString::from("  ")).is_err());
    }

    #[test]
    fn missing_env_names_the_variable() {
        let config = AlpacaAuthConfig::default()
            .with_env_vars("OPTIONS_LAB_TEST_MISSING_KEY", "OPTIONS_LAB_TEST_MISSING_SECRET");
        let err = AlpacaCredentials::from_env(&config).unwrap_err();
        assert!(err.to_string().contains("OPTIONS_LAB_TEST_MISSING_KEY"));
    }
}
