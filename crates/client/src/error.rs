//! Error types for the Graylog client.

use std::time::Duration;
use thiserror::Error;

/// Failure modes of a Graylog search attempt.
///
/// Every variant is recoverable at the caller boundary: a failed search
/// produces a [`crate::models::LogSearchResult`] with this error attached
/// and an empty message list, never a panic or a cached entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No API token configured; no network call was attempted.
    #[error("Graylog API token not configured")]
    Configuration,

    /// The request exceeded the configured timeout.
    #[error("Connection timeout after {0:?}")]
    Timeout(Duration),

    /// The Graylog host could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Graylog rejected the token (HTTP 401).
    #[error("Authentication failed - check API token")]
    AuthenticationFailed,

    /// The token lacks permission for the search API (HTTP 403).
    #[error("Permission denied - check token permissions")]
    PermissionDenied,

    /// Any other non-2xx response from Graylog.
    #[error("HTTP error {status} from {url}")]
    UpstreamHttp { status: u16, url: String },

    /// Anything else, including response bodies that do not parse.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SearchError {
    /// Check if this error indicates a credential problem.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthenticationFailed | Self::PermissionDenied)
    }

    /// Check if a retry could plausibly succeed without operator action.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::ConnectionFailed(_) => true,
            Self::UpstreamHttp { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }
}
