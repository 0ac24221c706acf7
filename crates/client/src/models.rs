//! Data model for Graylog search results.
//!
//! Log messages are owned by the Graylog API and passed through verbatim as
//! `serde_json::Value`; this crate never parses their inner shape.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::error::SearchError;

/// Raw body of `GET /api/search/universal/relative`.
///
/// Any other shape is treated as an unexpected error at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct RelativeSearchResponse {
    /// Raw message records, newest first.
    #[serde(default)]
    pub messages: Vec<Value>,
    /// Total matches within the window, which may exceed `messages.len()`.
    #[serde(default)]
    pub total_results: u64,
    /// Query execution time reported by Graylog, in milliseconds.
    #[serde(default)]
    pub time: f64,
}

/// Which query variant produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Wildcard match on the configured search field.
    #[default]
    Hostname,
    /// Single three-way OR over hostname and primary IP fields.
    Combined,
    /// Fallback match on `gl2_remote_ip`.
    Ip,
    /// Fallback match on `source` by IP.
    SourceIp,
}

impl SearchStrategy {
    /// Label as exposed to callers and templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Combined => "combined",
            Self::Ip => "ip",
            Self::SourceIp => "source_ip",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Lucene query string paired with its strategy label. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The Lucene query string.
    pub query: String,
    /// Label recorded on results produced by this query.
    pub strategy: SearchStrategy,
}

impl SearchQuery {
    pub fn new(query: String, strategy: SearchStrategy) -> Self {
        Self { query, strategy }
    }
}

/// Ordered fallback plan for an inventory object.
///
/// The primary query always runs; each fallback runs only if its
/// predecessor returned zero messages and no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub primary: SearchQuery,
    pub fallbacks: Vec<SearchQuery>,
}

/// Uniform result envelope for a search call.
///
/// Exactly one terminal state per call: either `error` is `None` and
/// `messages` holds whatever the upstream returned (possibly empty), or
/// `error` is populated and `messages` is empty.
#[derive(Debug, Clone)]
pub struct LogSearchResult {
    /// Raw message records passed through from Graylog.
    pub messages: Vec<Value>,
    /// Total matches reported by Graylog.
    pub total_results: u64,
    /// Query execution time reported by Graylog, in milliseconds.
    pub time: f64,
    /// The query string that was executed.
    pub query: String,
    /// The search window used.
    pub time_range: Duration,
    /// Which query variant produced this result.
    pub strategy: SearchStrategy,
    /// Display name of the inventory object, set by the `get_logs_for_*`
    /// operations.
    pub object_name: Option<String>,
    /// Failure descriptor; present only with an empty message list.
    pub error: Option<SearchError>,
}

impl LogSearchResult {
    /// Build a successful envelope from a raw upstream response.
    pub fn from_response(
        response: RelativeSearchResponse,
        query: &str,
        time_range: Duration,
    ) -> Self {
        Self {
            messages: response.messages,
            total_results: response.total_results,
            time: response.time,
            query: query.to_string(),
            time_range,
            strategy: SearchStrategy::default(),
            object_name: None,
            error: None,
        }
    }

    /// Build a failure envelope: empty messages, error populated.
    pub fn failed(query: &str, time_range: Duration, error: SearchError) -> Self {
        Self {
            messages: Vec::new(),
            total_results: 0,
            time: 0.0,
            query: query.to_string(),
            time_range,
            strategy: SearchStrategy::default(),
            object_name: None,
            error: Some(error),
        }
    }

    /// True when the call failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when at least one message was returned.
    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }
}
