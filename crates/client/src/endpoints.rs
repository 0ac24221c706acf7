//! Graylog REST API endpoint functions.
//!
//! One free function per endpoint, taking the shared `reqwest::Client` and
//! connection details. Errors are mapped to the `SearchError` taxonomy at
//! this boundary; callers never see raw `reqwest` errors.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

use crate::error::SearchError;
use crate::models::RelativeSearchResponse;

/// Value of the `X-Requested-By` header Graylog expects from API clients.
const REQUESTED_BY: &str = "graylog-client";

/// Fixed sort order: newest messages first.
const SORT: &str = "timestamp:desc";

/// Parameters for a relative-range search.
#[derive(Debug, Clone)]
pub struct SearchParams<'a> {
    /// Lucene query string.
    pub query: &'a str,
    /// Relative window ending now.
    pub range: Duration,
    /// Maximum number of messages to return.
    pub limit: u64,
    /// Optional field projection, joined with commas on the wire.
    pub fields: Option<&'a [&'a str]>,
}

/// Execute `GET /api/search/universal/relative`.
///
/// Authentication is the token as basic-auth username with the literal
/// password `token`, the scheme Graylog mandates for API tokens.
pub async fn relative_search(
    http: &Client,
    base_url: &str,
    api_token: &SecretString,
    params: &SearchParams<'_>,
    timeout: Duration,
) -> Result<RelativeSearchResponse, SearchError> {
    let url = format!("{base_url}/api/search/universal/relative");

    let mut pairs: Vec<(&str, String)> = vec![
        ("query", params.query.to_string()),
        ("range", params.range.as_secs().to_string()),
        ("limit", params.limit.to_string()),
        ("sort", SORT.to_string()),
    ];
    if let Some(fields) = params.fields {
        pairs.push(("fields", fields.join(",")));
    }

    debug!(query = params.query, range = params.range.as_secs(), "querying Graylog");

    let response = http
        .get(&url)
        .basic_auth(api_token.expose_secret(), Some("token"))
        .header(reqwest::header::ACCEPT, "application/json")
        .header("X-Requested-By", REQUESTED_BY)
        .query(&pairs)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout(timeout)
            } else if e.is_connect() {
                SearchError::ConnectionFailed(base_url.to_string())
            } else {
                SearchError::Unexpected(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(match status.as_u16() {
            401 => SearchError::AuthenticationFailed,
            403 => SearchError::PermissionDenied,
            code => SearchError::UpstreamHttp { status: code, url },
        });
    }

    response
        .json::<RelativeSearchResponse>()
        .await
        .map_err(|e| SearchError::Unexpected(format!("invalid response body: {e}")))
}
