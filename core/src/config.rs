//! Client configuration: where the API lives and whose credentials to use.

use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://dna.magnetmail.net/ApiAdapter/Rest/";

const ENV_USERNAME: &str = "MAGNET_USERNAME";
const ENV_PASSWORD: &str = "MAGNET_PASSWORD";
const ENV_BASE_URL: &str = "MAGNET_BASE_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credentials for the production endpoint.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, username, password)
    }

    /// Read `MAGNET_USERNAME` and `MAGNET_PASSWORD`, plus an optional
    /// `MAGNET_BASE_URL` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                None => Err(ConfigError::MissingVar(key)),
                Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyVar(key)),
                Some(value) => Ok(value),
            }
        };
        let username = required(ENV_USERNAME)?;
        let password = required(ENV_PASSWORD)?;
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(base_url, username, password))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
