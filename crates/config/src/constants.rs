//! Centralized defaults and option bounds for the Graylog search workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection Defaults
// =============================================================================

/// Default Graylog API base URL.
pub const DEFAULT_GRAYLOG_URL: &str = "http://graylog:9000";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Minimum allowed request timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 5;

/// Maximum allowed request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Search Defaults
// =============================================================================

/// Default relative search window in seconds (1 hour).
pub const DEFAULT_TIME_RANGE_SECS: u64 = 3600;

/// Default maximum number of log messages per request.
pub const DEFAULT_LOG_LIMIT: u64 = 50;

/// Minimum allowed log limit.
pub const MIN_LOG_LIMIT: u64 = 10;

/// Maximum allowed log limit.
pub const MAX_LOG_LIMIT: u64 = 500;

// =============================================================================
// Cache Defaults
// =============================================================================

/// Default cache TTL in seconds. Zero disables caching.
pub const DEFAULT_CACHE_TIMEOUT_SECS: u64 = 60;

/// Maximum allowed cache TTL in seconds.
pub const MAX_CACHE_TIMEOUT_SECS: u64 = 300;
