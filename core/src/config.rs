//! Client configuration.
//!
//! The secret key, base URL, and timeout are fixed when the `Client` is
//! built. They can come from code, from a deserialized config file section,
//! or from the environment.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_SECRET_KEY: &str = "PAYSTACK_SECRET_KEY";
pub const ENV_BASE_URL: &str = "PAYSTACK_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PAYSTACK_TIMEOUT_SECS";

/// Bearer credential. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

/// Settings for a `Client`.
///
/// ```toml
/// [paystack]
/// secret_key = "sk_test_..."
/// base_url = "https://api.paystack.co"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub secret_key: SecretKey,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("paystack-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretKey::new(secret_key),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Timeouts are kept in whole seconds; any fractional part rounds up.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let fractional = u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = timeout.as_secs().saturating_add(fractional);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Read configuration from `PAYSTACK_SECRET_KEY`, `PAYSTACK_BASE_URL`
    /// and `PAYSTACK_TIMEOUT_SECS`. Only the secret key is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret_key = lookup(ENV_SECRET_KEY)
            .ok_or_else(|| ApiError::InvalidRequest(format!("{ENV_SECRET_KEY} is not set")))?;
        let mut config = Self::new(secret_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::InvalidRequest(format!("{ENV_TIMEOUT_SECS} must be an integer")))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the key is present, the base URL is http(s), and the
    /// timeout is between 1 and 300 seconds.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.expose().trim().is_empty() {
            return Err(ApiError::InvalidRequest("secret key must not be empty".to_string()));
        }
        self.parsed_base_url()?;
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ApiError::InvalidRequest(
                "timeout_secs must be between 1 and 300".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL {}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ApiError::InvalidRequest(format!(
                "base URL must be http or https, got {other}"
            ))),
        }
    }
}
