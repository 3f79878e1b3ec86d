//! Configuration for the CDISC Library client.

use std::fmt;
use std::time::Duration;

use crate::error::{LibraryError, Result};

/// Default CDISC Library API base URL.
pub const DEFAULT_BASE_URL: &str = "https://library.cdisc.org/api";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings passed to [`crate::RegistryClient::new`].
///
/// The API key is checked when the value is built, so a missing credential
/// fails before any request is issued.
#[derive(Clone)]
pub struct LibraryConfig {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl LibraryConfig {
    /// Creates a configuration for the public CDISC Library.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LibraryError::MissingCredential);
        }
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.trim().to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Creates a configuration from an optional key (e.g. an unset env var).
    pub fn from_optional_key(api_key: Option<String>) -> Result<Self> {
        Self::new(api_key.ok_or(LibraryError::MissingCredential)?)
    }

    /// Overrides the API base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(LibraryError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for a registry path such as `/mdr/products/Terminology`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for LibraryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
