//! Client configuration loaded from environment variables.

use serde::Deserialize;

/// Base URL used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Request timeout applied to every call, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Root address of the user-management API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-client request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub api_timeout_ms: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Resolve configuration from an explicit set of key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config: Self = envy::from_iter(vars)?;

        // An empty API_URL counts as unset.
        if config.api_url.trim().is_empty() {
            config.api_url = default_api_url();
        }

        Ok(config)
    }

    /// Override the base URL, keeping every other setting.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Effective base URL.
    pub fn base_url(&self) -> &str {
        &self.api_url
    }

    /// Request timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.api_timeout_ms)
    }
}
