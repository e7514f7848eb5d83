//! Client configuration for the item pager.
//!
//! Settings come from defaults, then `ITEM_PAGER_*` environment variables,
//! then explicit builder overrides (the CLI applies its flags this way).

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Placeholder endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com/items";

/// Default number of items requested per page.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size the client will ask for.
pub const MAX_PER_PAGE: u32 = 1000;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration for talking to a paginated items endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint that serves pages; `page` and `per_page` are appended.
    pub base_url: String,
    /// Items requested per page.
    pub per_page: u32,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout: Duration::from_secs(30),
            user_agent: format!("item-pager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ITEM_PAGER_BASE_URL`: endpoint URL (default: placeholder)
    /// - `ITEM_PAGER_PER_PAGE`: page size (default: 20)
    /// - `ITEM_PAGER_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    /// - `ITEM_PAGER_USER_AGENT`: User-Agent header
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or the resulting
    /// configuration does not validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("ITEM_PAGER_BASE_URL") {
            config.base_url = val;
        }

        if let Some(val) = lookup("ITEM_PAGER_PER_PAGE") {
            config.per_page = parse_env_value(&val, "ITEM_PAGER_PER_PAGE")?;
        }

        if let Some(val) = lookup("ITEM_PAGER_TIMEOUT_SECS") {
            let secs: u64 = parse_env_value(&val, "ITEM_PAGER_TIMEOUT_SECS")?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(val) = lookup("ITEM_PAGER_USER_AGENT") {
            config.user_agent = val;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::ValidationFailed(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "user_agent cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Parses `base_url`, requiring an absolute http(s) URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::ValidationFailed(format!("base_url '{}' is invalid: {e}", self.base_url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::ValidationFailed(format!(
                "base_url must use http or https, got '{other}'"
            ))),
        }
    }

    /// Builder method to set the endpoint URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder method to set the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn parse_env_value<T: std::str::FromStr>(val: &str, key: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    val.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
