//! Configuration types for the Graylog log-search service.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

use crate::constants::{
    DEFAULT_CACHE_TIMEOUT_SECS, DEFAULT_GRAYLOG_URL, DEFAULT_LOG_LIMIT, DEFAULT_TIME_RANGE_SECS,
    DEFAULT_TIMEOUT_SECS,
};

/// Module for serializing an optional SecretString as a plain string.
mod option_secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret
            .as_ref()
            .map(|s| s.expose_secret().to_string())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()).map(|s| SecretString::new(s.into())))
    }
}

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Graylog message field searched for a hostname match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// The `source` field (hostname as reported by the sender).
    #[default]
    Source,
    /// The `gl2_remote_ip` field (remote IP recorded by Graylog).
    Gl2RemoteIp,
}

impl SearchField {
    /// Field name as it appears in a Lucene query.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Gl2RemoteIp => "gl2_remote_ip",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide configuration for the Graylog search service.
///
/// Loaded once at startup via [`crate::ConfigLoader`] and treated as
/// read-only for the process lifetime. Runtime mutation is deliberately
/// unsupported (see [`crate::persistence`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraylogConfig {
    /// Base URL of the Graylog REST API (e.g., http://graylog:9000).
    pub graylog_url: String,
    /// Optional browser-facing Graylog URL for human links. Falls back to
    /// `graylog_url` when unset.
    pub graylog_external_url: Option<String>,
    /// Graylog API token. Searches fail with a configuration error when unset.
    #[serde(with = "option_secret_string")]
    pub graylog_api_token: Option<SecretString>,
    /// Maximum number of log messages per request.
    pub log_limit: u64,
    /// Default relative search window (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub time_range: Duration,
    /// HTTP request timeout (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Cache TTL for successful search results (serialized as seconds).
    /// Zero disables caching.
    #[serde(with = "duration_seconds")]
    pub cache_timeout: Duration,
    /// Field searched for the hostname query.
    pub search_field: SearchField,
    /// Match the full FQDN; when false, names are truncated before the
    /// first `.` before querying.
    pub use_fqdn: bool,
    /// Fall back to the primary IPv4 address when hostname search fails.
    pub fallback_to_ip: bool,
}

impl Default for GraylogConfig {
    fn default() -> Self {
        Self {
            graylog_url: DEFAULT_GRAYLOG_URL.to_string(),
            graylog_external_url: None,
            graylog_api_token: None,
            log_limit: DEFAULT_LOG_LIMIT,
            time_range: Duration::from_secs(DEFAULT_TIME_RANGE_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_timeout: Duration::from_secs(DEFAULT_CACHE_TIMEOUT_SECS),
            search_field: SearchField::Source,
            use_fqdn: true,
            fallback_to_ip: true,
        }
    }
}

impl GraylogConfig {
    /// Browser-viewable Graylog base URL for constructing human-facing links.
    ///
    /// Uses `graylog_external_url` when configured, otherwise the API base URL.
    pub fn external_url(&self) -> &str {
        self.graylog_external_url
            .as_deref()
            .unwrap_or(&self.graylog_url)
    }
}
