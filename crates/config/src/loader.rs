//! Configuration loader for environment variables and programmatic overrides.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and `GRAYLOG_*` environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical merging.
//! - Validate option ranges before handing out a `GraylogConfig`.
//!
//! Does NOT handle:
//! - Persisting configuration back to disk (runtime persistence is refused,
//!   see `persistence.rs`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over programmatic defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    MAX_CACHE_TIMEOUT_SECS, MAX_LOG_LIMIT, MAX_TIMEOUT_SECS, MIN_LOG_LIMIT, MIN_TIMEOUT_SECS,
};
use crate::types::{GraylogConfig, SearchField};

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("{var} must be between {min} and {max} (got {value})")]
    OutOfRange {
        var: String,
        min: u64,
        max: u64,
        value: u64,
    },

    #[error("Invalid URL for {var}: {message}")]
    InvalidUrl { var: String, message: String },

    #[error(
        "Settings are managed statically through the host configuration; \
         runtime changes are not persisted. Update the deployment configuration \
         and restart the process instead."
    )]
    StaticConfiguration,
}

/// Configuration loader that builds a `GraylogConfig` from environment
/// variables and programmatic overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    graylog_url: Option<String>,
    graylog_external_url: Option<String>,
    api_token: Option<SecretString>,
    log_limit: Option<u64>,
    time_range: Option<Duration>,
    timeout: Option<Duration>,
    cache_timeout: Option<Duration>,
    search_field: Option<SearchField>,
    use_fqdn: Option<bool>,
    fallback_to_ip: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the `.env` file will not be loaded (useful for testing).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("true")
            && std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("1")
        {
            dotenvy::dotenv().ok();
        }
        Ok(self)
    }

    /// Read an environment variable, returning None if unset, empty, or whitespace-only.
    pub fn env_var_or_none(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    fn parse_u64(var: &str, value: &str) -> Result<u64, ConfigError> {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: "must be a number".to_string(),
            })
    }

    fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: "must be true or false".to_string(),
            })
    }

    /// Read configuration from `GRAYLOG_*` environment variables.
    ///
    /// Environment variables take precedence over earlier `with_*` overrides.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if let Some(url) = Self::env_var_or_none("GRAYLOG_URL") {
            self.graylog_url = Some(url);
        }
        if let Some(url) = Self::env_var_or_none("GRAYLOG_EXTERNAL_URL") {
            self.graylog_external_url = Some(url);
        }
        if let Some(token) = Self::env_var_or_none("GRAYLOG_API_TOKEN") {
            self.api_token = Some(SecretString::new(token.into()));
        }
        if let Some(limit) = Self::env_var_or_none("GRAYLOG_LOG_LIMIT") {
            self.log_limit = Some(Self::parse_u64("GRAYLOG_LOG_LIMIT", &limit)?);
        }
        if let Some(range) = Self::env_var_or_none("GRAYLOG_TIME_RANGE") {
            let secs = Self::parse_u64("GRAYLOG_TIME_RANGE", &range)?;
            self.time_range = Some(Duration::from_secs(secs));
        }
        if let Some(timeout) = Self::env_var_or_none("GRAYLOG_TIMEOUT") {
            let secs = Self::parse_u64("GRAYLOG_TIMEOUT", &timeout)?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ttl) = Self::env_var_or_none("GRAYLOG_CACHE_TIMEOUT") {
            let secs = Self::parse_u64("GRAYLOG_CACHE_TIMEOUT", &ttl)?;
            self.cache_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(field) = Self::env_var_or_none("GRAYLOG_SEARCH_FIELD") {
            self.search_field = Some(match field.trim() {
                "source" => SearchField::Source,
                "gl2_remote_ip" => SearchField::Gl2RemoteIp,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "GRAYLOG_SEARCH_FIELD".to_string(),
                        message: "must be 'source' or 'gl2_remote_ip'".to_string(),
                    });
                }
            });
        }
        if let Some(fqdn) = Self::env_var_or_none("GRAYLOG_USE_FQDN") {
            self.use_fqdn = Some(Self::parse_bool("GRAYLOG_USE_FQDN", &fqdn)?);
        }
        if let Some(fallback) = Self::env_var_or_none("GRAYLOG_FALLBACK_TO_IP") {
            self.fallback_to_ip = Some(Self::parse_bool("GRAYLOG_FALLBACK_TO_IP", &fallback)?);
        }
        Ok(self)
    }

    /// Set the Graylog API base URL.
    pub fn with_graylog_url(mut self, url: String) -> Self {
        self.graylog_url = Some(url);
        self
    }

    /// Set the browser-facing Graylog URL.
    pub fn with_external_url(mut self, url: String) -> Self {
        self.graylog_external_url = Some(url);
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the per-request log limit.
    pub fn with_log_limit(mut self, limit: u64) -> Self {
        self.log_limit = Some(limit);
        self
    }

    /// Set the default search window.
    pub fn with_time_range(mut self, range: Duration) -> Self {
        self.time_range = Some(range);
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the cache TTL. Zero disables caching.
    pub fn with_cache_timeout(mut self, ttl: Duration) -> Self {
        self.cache_timeout = Some(ttl);
        self
    }

    /// Set the field searched for hostnames.
    pub fn with_search_field(mut self, field: SearchField) -> Self {
        self.search_field = Some(field);
        self
    }

    /// Set whether hostnames are matched as FQDNs.
    pub fn with_use_fqdn(mut self, use_fqdn: bool) -> Self {
        self.use_fqdn = Some(use_fqdn);
        self
    }

    /// Set whether hostname searches fall back to the primary IP.
    pub fn with_fallback_to_ip(mut self, fallback: bool) -> Self {
        self.fallback_to_ip = Some(fallback);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<GraylogConfig, ConfigError> {
        let mut config = GraylogConfig::default();

        if let Some(url) = self.graylog_url {
            config.graylog_url = url;
        }
        config.graylog_external_url = self.graylog_external_url;
        config.graylog_api_token = self.api_token;
        if let Some(limit) = self.log_limit {
            config.log_limit = limit;
        }
        if let Some(range) = self.time_range {
            config.time_range = range;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(ttl) = self.cache_timeout {
            config.cache_timeout = ttl;
        }
        if let Some(field) = self.search_field {
            config.search_field = field;
        }
        if let Some(fqdn) = self.use_fqdn {
            config.use_fqdn = fqdn;
        }
        if let Some(fallback) = self.fallback_to_ip {
            config.fallback_to_ip = fallback;
        }

        validate(&config)?;
        Ok(config)
    }
}

/// Validate option ranges and URL shapes.
pub fn validate(config: &GraylogConfig) -> Result<(), ConfigError> {
    url::Url::parse(&config.graylog_url).map_err(|e| ConfigError::InvalidUrl {
        var: "graylog_url".to_string(),
        message: e.to_string(),
    })?;
    if let Some(external) = &config.graylog_external_url {
        url::Url::parse(external).map_err(|e| ConfigError::InvalidUrl {
            var: "graylog_external_url".to_string(),
            message: e.to_string(),
        })?;
    }

    if !(MIN_LOG_LIMIT..=MAX_LOG_LIMIT).contains(&config.log_limit) {
        return Err(ConfigError::OutOfRange {
            var: "log_limit".to_string(),
            min: MIN_LOG_LIMIT,
            max: MAX_LOG_LIMIT,
            value: config.log_limit,
        });
    }
    if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&config.timeout.as_secs()) {
        return Err(ConfigError::OutOfRange {
            var: "timeout".to_string(),
            min: MIN_TIMEOUT_SECS,
            max: MAX_TIMEOUT_SECS,
            value: config.timeout.as_secs(),
        });
    }
    if config.cache_timeout.as_secs() > MAX_CACHE_TIMEOUT_SECS {
        return Err(ConfigError::OutOfRange {
            var: "cache_timeout".to_string(),
            min: 0,
            max: MAX_CACHE_TIMEOUT_SECS,
            value: config.cache_timeout.as_secs(),
        });
    }
    if config.time_range.is_zero() {
        return Err(ConfigError::InvalidValue {
            var: "time_range".to_string(),
            message: "must be at least one second".to_string(),
        });
    }

    Ok(())
}
